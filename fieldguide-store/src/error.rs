//! Store error types.

use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A setting could not be parsed.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting or environment variable name.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A stored entry exists but is unreadable.
    #[error("Corrupt entry '{0}'")]
    Corrupt(String),
}

impl StoreError {
    /// Returns true if the underlying file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<fieldguide_core::CoreError> for StoreError {
    fn from(err: fieldguide_core::CoreError) -> Self {
        StoreError::Config(err.to_string())
    }
}
