//! Persistence facade with remote-first, local-fallback semantics.
//!
//! [`DataProvider`] tries the remote backend for every call and, on any
//! failure, repeats the call against the local backend. The outcome is a
//! [`Served`] value recording which backend answered.

pub mod outcome;
pub mod provider;

pub use outcome::{Backend, ProviderError, Served};
pub use provider::{DataProvider, ProviderResult};
