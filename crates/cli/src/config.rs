use std::path::PathBuf;
use std::time::Duration;

use shopfront_remote::DEFAULT_BASE_URL;

/// Default directory of the file-backed local store.
pub const DEFAULT_DATA_DIR: &str = ".shopfront";

/// Default per-request timeout for the remote API, in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

/// Runtime configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against a
/// collection API on port 3001.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the remote collection API.
    pub api_url: String,
    /// Deadline applied to each remote request.
    pub api_timeout: Duration,
    /// Directory holding the local store's documents.
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `SHOPFRONT_API_URL`        | `http://localhost:3001` |
    /// | `SHOPFRONT_API_TIMEOUT_MS` | `3000`                  |
    /// | `SHOPFRONT_DATA_DIR`       | `.shopfront`            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value
    /// of a variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("SHOPFRONT_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let api_timeout_ms = match lookup("SHOPFRONT_API_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: "SHOPFRONT_API_TIMEOUT_MS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_API_TIMEOUT_MS,
        };

        let data_dir = lookup("SHOPFRONT_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
            .into();

        Ok(Self {
            api_url,
            api_timeout: Duration::from_millis(api_timeout_ms),
            data_dir,
        })
    }
}
