use shopfront_core::error::CoreError;

/// Failures from the on-device store.
#[derive(Debug, thiserror::Error)]
pub enum LocalStoreError {
    /// A domain-level failure, e.g. updating a product that does not exist.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing the underlying storage failed.
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A persisted collection did not decode as the expected JSON shape.
    #[error("Malformed data under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The collection already holds the largest representable id.
    #[error("No ids left in '{key}'")]
    IdsExhausted { key: &'static str },

    /// A collection could not be encoded for writing.
    #[error("Failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
