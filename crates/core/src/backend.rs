//! The operation surface every persistence backend provides.

use async_trait::async_trait;

use crate::comment::Comment;
use crate::product::{Product, ProductFormData};
use crate::types::DbId;

/// A product/comment collection backend.
///
/// Implemented by the remote collection API client and by the on-device
/// store. Each call is independent; backends hold no per-session state
/// beyond their own persisted collections.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All products, each with its comments joined in.
    async fn list_products(&self) -> Result<Vec<Product>, Self::Error>;

    /// Create a product; the backend assigns the id. Comments start empty.
    async fn create_product(&self, form: &ProductFormData) -> Result<Product, Self::Error>;

    /// Replace the editable fields of product `id`, returning it with its
    /// current comments.
    async fn update_product(&self, id: DbId, form: &ProductFormData)
        -> Result<Product, Self::Error>;

    /// Delete product `id` together with its comments.
    async fn delete_product(&self, id: DbId) -> Result<DbId, Self::Error>;

    async fn create_comment(
        &self,
        product_id: DbId,
        description: &str,
    ) -> Result<Comment, Self::Error>;

    async fn delete_comment(&self, comment_id: DbId) -> Result<DbId, Self::Error>;
}
