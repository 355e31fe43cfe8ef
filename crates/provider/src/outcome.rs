//! Typed results of a facade call.

use std::fmt;

/// Which backend answered a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Remote,
    Local,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => f.write_str("remote"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// A successful facade result tagged with the backend that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Served<T> {
    Remote(T),
    /// The remote call failed and the local backend answered instead.
    Local(T),
}

impl<T> Served<T> {
    pub fn backend(&self) -> Backend {
        match self {
            Self::Remote(_) => Backend::Remote,
            Self::Local(_) => Backend::Local,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Remote(v) | Self::Local(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Remote(v) | Self::Local(v) => v,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Served<U> {
        match self {
            Self::Remote(v) => Served::Remote(f(v)),
            Self::Local(v) => Served::Local(f(v)),
        }
    }
}

/// Both backends failed. The local failure is terminal; the remote one
/// is kept only as text for diagnostics.
#[derive(Debug, thiserror::Error)]
#[error("{operation} failed on both backends: local: {local} (remote: {remote})")]
pub struct ProviderError<E: std::error::Error + 'static> {
    pub operation: &'static str,
    pub remote: String,
    #[source]
    pub local: E,
}
