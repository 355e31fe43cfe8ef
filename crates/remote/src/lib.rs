//! Client for the remote product/comment collection API.
//!
//! The API exposes two JSON collections, `products` and `comments`, with
//! list (optionally filtered by `productId`), create, partial update and
//! delete. Comments are stored apart from products and joined client-side.

pub mod api;
pub mod payload;

pub use api::{CatalogApi, RemoteError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
