//! Store error types.

use khata_shared::AppError;
use thiserror::Error;

/// Snapshot store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document stored under the key.
    #[error("document not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// The stored document could not be (de)serialized.
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Store provider configuration error.
    #[error("store configuration error: {0}")]
    Configuration(String),

    /// Backend operation error.
    #[error("store operation failed: {0}")]
    Operation(String),
}

impl StoreError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an operation error.
    #[must_use]
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }
}

impl From<opendal::Error> for StoreError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            _ => Self::Operation(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            _ => Self::Persistence(err.to_string()),
        }
    }
}
