//! On-device persistence for the shopfront catalog.
//!
//! - [`KeyValueStore`]: string-keyed storage of JSON documents
//!   ([`FileStore`] on disk, [`MemoryStore`] in memory).
//! - [`LocalStore`]: the product and comment collections kept under two
//!   fixed keys, seeded on first access.

pub mod error;
pub mod kv;
pub mod local_store;
pub mod seed;

pub use error::LocalStoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use local_store::{next_id, LocalStore, COMMENTS_KEY, PRODUCTS_KEY};
