//! The remote-first facade.
//!
//! Each operation is an explicit two-step attempt: the remote backend
//! first, then, only if it failed, the local backend. Results are never
//! mixed and nothing is reconciled between backends, so a session that
//! switches backend mid-way sees whichever collection answered last.

use std::future::Future;

use shopfront_core::backend::CatalogBackend;
use shopfront_core::comment::Comment;
use shopfront_core::product::{Product, ProductFormData};
use shopfront_core::types::DbId;

use crate::outcome::{ProviderError, Served};

/// Result of a facade call.
pub type ProviderResult<T, L> = Result<Served<T>, ProviderError<<L as CatalogBackend>::Error>>;

/// Remote-first persistence facade over two [`CatalogBackend`]s.
pub struct DataProvider<R, L> {
    remote: R,
    local: L,
}

impl<R, L> DataProvider<R, L>
where
    R: CatalogBackend,
    L: CatalogBackend,
{
    pub fn new(remote: R, local: L) -> Self {
        Self { remote, local }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub async fn list_products(&self) -> ProviderResult<Vec<Product>, L> {
        self.attempt(
            "list_products",
            self.remote.list_products(),
            self.local.list_products(),
        )
        .await
    }

    pub async fn create_product(&self, form: &ProductFormData) -> ProviderResult<Product, L> {
        self.attempt(
            "create_product",
            self.remote.create_product(form),
            self.local.create_product(form),
        )
        .await
    }

    pub async fn update_product(
        &self,
        id: DbId,
        form: &ProductFormData,
    ) -> ProviderResult<Product, L> {
        self.attempt(
            "update_product",
            self.remote.update_product(id, form),
            self.local.update_product(id, form),
        )
        .await
    }

    pub async fn delete_product(&self, id: DbId) -> ProviderResult<DbId, L> {
        self.attempt(
            "delete_product",
            self.remote.delete_product(id),
            self.local.delete_product(id),
        )
        .await
    }

    pub async fn create_comment(
        &self,
        product_id: DbId,
        description: &str,
    ) -> ProviderResult<Comment, L> {
        self.attempt(
            "create_comment",
            self.remote.create_comment(product_id, description),
            self.local.create_comment(product_id, description),
        )
        .await
    }

    pub async fn delete_comment(&self, comment_id: DbId) -> ProviderResult<DbId, L> {
        self.attempt(
            "delete_comment",
            self.remote.delete_comment(comment_id),
            self.local.delete_comment(comment_id),
        )
        .await
    }

    /// Await `remote`; on failure, await `local` instead.
    ///
    /// Both futures are built up front but futures do nothing until
    /// polled, so the local call only runs after a remote failure.
    async fn attempt<T>(
        &self,
        operation: &'static str,
        remote: impl Future<Output = Result<T, R::Error>>,
        local: impl Future<Output = Result<T, L::Error>>,
    ) -> ProviderResult<T, L> {
        let remote_err = match remote.await {
            Ok(value) => {
                tracing::debug!(operation, backend = "remote", "Catalog call served");
                return Ok(Served::Remote(value));
            }
            Err(e) => e,
        };

        tracing::warn!(
            operation,
            error = %remote_err,
            "Remote catalog call failed, falling back to local store"
        );

        match local.await {
            Ok(value) => {
                tracing::debug!(operation, backend = "local", "Catalog call served");
                Ok(Served::Local(value))
            }
            Err(local) => {
                tracing::error!(operation, error = %local, "Local store call failed");
                Err(ProviderError {
                    operation,
                    remote: remote_err.to_string(),
                    local,
                })
            }
        }
    }
}
