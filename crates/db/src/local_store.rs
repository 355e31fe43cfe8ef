//! Product and comment collections persisted in a [`KeyValueStore`].
//!
//! Products are stored without comments under [`PRODUCTS_KEY`]; comments
//! live under [`COMMENTS_KEY`] and are joined by `product_id` on read.
//! Every call reads and rewrites whole collections, so concurrent writers
//! in one process follow last-write-wins.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shopfront_core::backend::CatalogBackend;
use shopfront_core::comment::{Comment, NewComment};
use shopfront_core::error::CoreError;
use shopfront_core::product::{Product, ProductFormData, ProductRecord};
use shopfront_core::types::DbId;

use crate::error::LocalStoreError;
use crate::kv::KeyValueStore;
use crate::seed;

/// Storage key of the product collection.
pub const PRODUCTS_KEY: &str = "shopApp_products";

/// Storage key of the comment collection.
pub const COMMENTS_KEY: &str = "shopApp_comments";

/// Next id for a collection: one past the current maximum, or `1` when empty.
///
/// Computed over live records only, so the id of a deleted maximum can be
/// handed out again. `None` once the maximum is `DbId::MAX`.
pub fn next_id(ids: impl IntoIterator<Item = DbId>) -> Option<DbId> {
    match ids.into_iter().max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// The on-device catalog backend.
pub struct LocalStore<S> {
    kv: S,
}

impl<S: KeyValueStore> LocalStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// The underlying key-value store.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn list_products(&self) -> Result<Vec<Product>, LocalStoreError> {
        let records = self.read_products()?;
        let comments = self.read_comments()?;
        tracing::debug!(
            products = records.len(),
            comments = comments.len(),
            "Listing local products"
        );
        Ok(join_comments(records, &comments))
    }

    pub fn create_product(&self, form: &ProductFormData) -> Result<Product, LocalStoreError> {
        form.check_encodable()?;
        let mut records = self.read_products()?;
        let id = allocate_id(PRODUCTS_KEY, records.iter().map(|p| p.id))?;
        let record = ProductRecord::from_form(id, form);
        records.push(record.clone());
        self.write_products(&records)?;

        tracing::debug!(product_id = id, "Created local product");
        Ok(record.with_comments(Vec::new()))
    }

    pub fn update_product(
        &self,
        id: DbId,
        form: &ProductFormData,
    ) -> Result<Product, LocalStoreError> {
        form.check_encodable()?;
        let mut records = self.read_products()?;
        let record = records
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::product_not_found(id))?;
        record.apply_form(form);
        let updated = record.clone();
        self.write_products(&records)?;

        let comments = self
            .read_comments()?
            .into_iter()
            .filter(|c| c.product_id == id)
            .collect();

        tracing::debug!(product_id = id, "Updated local product");
        Ok(updated.with_comments(comments))
    }

    /// Remove the product and every comment that references it. Deleting
    /// an absent id succeeds.
    pub fn delete_product(&self, id: DbId) -> Result<DbId, LocalStoreError> {
        let mut records = self.read_products()?;
        records.retain(|p| p.id != id);
        self.write_products(&records)?;

        let mut comments = self.read_comments()?;
        let before = comments.len();
        comments.retain(|c| c.product_id != id);
        self.write_comments(&comments)?;

        tracing::debug!(
            product_id = id,
            comments_removed = before - comments.len(),
            "Deleted local product"
        );
        Ok(id)
    }

    /// Append a comment. `product_id` is not checked against the product
    /// collection.
    pub fn create_comment(
        &self,
        product_id: DbId,
        description: &str,
    ) -> Result<Comment, LocalStoreError> {
        let mut comments = self.read_comments()?;
        let id = allocate_id(COMMENTS_KEY, comments.iter().map(|c| c.id))?;
        let comment = NewComment::new(product_id, description).with_id(id);
        comments.push(comment.clone());
        self.write_comments(&comments)?;

        tracing::debug!(comment_id = id, product_id, "Created local comment");
        Ok(comment)
    }

    pub fn delete_comment(&self, comment_id: DbId) -> Result<DbId, LocalStoreError> {
        let mut comments = self.read_comments()?;
        comments.retain(|c| c.id != comment_id);
        self.write_comments(&comments)?;

        tracing::debug!(comment_id, "Deleted local comment");
        Ok(comment_id)
    }

    // ---- private helpers ----

    /// Seed each collection that is absent. Existing data, including an
    /// empty array, is left alone.
    fn ensure_initialized(&self) -> Result<(), LocalStoreError> {
        if self.is_absent(PRODUCTS_KEY)? {
            tracing::info!(key = PRODUCTS_KEY, "Seeding default products");
            self.write(PRODUCTS_KEY, &seed::default_products())?;
        }
        if self.is_absent(COMMENTS_KEY)? {
            tracing::info!(key = COMMENTS_KEY, "Seeding default comments");
            self.write(COMMENTS_KEY, &seed::default_comments())?;
        }
        Ok(())
    }

    fn is_absent(&self, key: &str) -> Result<bool, LocalStoreError> {
        let raw = self.kv.get(key).map_err(|source| LocalStoreError::Io {
            key: key.to_string(),
            source,
        })?;
        Ok(raw.map_or(true, |r| r.is_empty()))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, LocalStoreError> {
        self.ensure_initialized()?;
        let raw = self.kv.get(key).map_err(|source| LocalStoreError::Io {
            key: key.to_string(),
            source,
        })?;
        match raw {
            Some(raw) if !raw.is_empty() => {
                serde_json::from_str(&raw).map_err(|source| LocalStoreError::Malformed {
                    key: key.to_string(),
                    source,
                })
            }
            _ => Ok(Vec::new()),
        }
    }

    fn write<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), LocalStoreError> {
        let raw = serde_json::to_string(items).map_err(|source| LocalStoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.kv.set(key, &raw).map_err(|source| LocalStoreError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn read_products(&self) -> Result<Vec<ProductRecord>, LocalStoreError> {
        self.read(PRODUCTS_KEY)
    }

    fn write_products(&self, records: &[ProductRecord]) -> Result<(), LocalStoreError> {
        self.write(PRODUCTS_KEY, records)
    }

    fn read_comments(&self) -> Result<Vec<Comment>, LocalStoreError> {
        self.read(COMMENTS_KEY)
    }

    fn write_comments(&self, comments: &[Comment]) -> Result<(), LocalStoreError> {
        self.write(COMMENTS_KEY, comments)
    }
}

fn allocate_id(
    key: &'static str,
    ids: impl IntoIterator<Item = DbId>,
) -> Result<DbId, LocalStoreError> {
    next_id(ids).ok_or(LocalStoreError::IdsExhausted { key })
}

/// Embed into each record the comments whose `product_id` matches it,
/// preserving both collections' order.
fn join_comments(records: Vec<ProductRecord>, comments: &[Comment]) -> Vec<Product> {
    records
        .into_iter()
        .map(|record| {
            let own = comments
                .iter()
                .filter(|c| c.product_id == record.id)
                .cloned()
                .collect();
            record.with_comments(own)
        })
        .collect()
}

#[async_trait]
impl<S: KeyValueStore> CatalogBackend for LocalStore<S> {
    type Error = LocalStoreError;

    async fn list_products(&self) -> Result<Vec<Product>, Self::Error> {
        LocalStore::list_products(self)
    }

    async fn create_product(&self, form: &ProductFormData) -> Result<Product, Self::Error> {
        LocalStore::create_product(self, form)
    }

    async fn update_product(
        &self,
        id: DbId,
        form: &ProductFormData,
    ) -> Result<Product, Self::Error> {
        LocalStore::update_product(self, id, form)
    }

    async fn delete_product(&self, id: DbId) -> Result<DbId, Self::Error> {
        LocalStore::delete_product(self, id)
    }

    async fn create_comment(
        &self,
        product_id: DbId,
        description: &str,
    ) -> Result<Comment, Self::Error> {
        LocalStore::create_comment(self, product_id, description)
    }

    async fn delete_comment(&self, comment_id: DbId) -> Result<DbId, Self::Error> {
        LocalStore::delete_comment(self, comment_id)
    }
}
