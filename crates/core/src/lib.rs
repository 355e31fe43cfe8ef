//! Shared domain model for the shopfront catalog.
//!
//! Holds the product and comment types, edit-buffer validation, the
//! view-time sort modes, the comment timestamp format, and the
//! [`backend::CatalogBackend`] trait implemented by every persistence
//! backend.

pub mod backend;
pub mod comment;
pub mod error;
pub mod product;
pub mod sorting;
pub mod timestamp;
pub mod types;
