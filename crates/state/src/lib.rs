//! Application state for the shopfront catalog.
//!
//! - [`ProductsState`]: the denormalized product list plus loading,
//!   error and sort fields, changed only through [`Action`]s.
//! - [`CatalogStore`]: owns the state and the persistence facade, runs
//!   each operation and dispatches its confirmed outcome.

pub mod state;
pub mod store;

pub use state::{Action, ProductsState, FETCH_FAILED_MESSAGE};
pub use store::CatalogStore;
