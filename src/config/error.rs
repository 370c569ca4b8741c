//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading machine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the engine cannot run with
    #[error("Invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
