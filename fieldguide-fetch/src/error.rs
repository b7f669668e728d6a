//! Fetch error types.

use std::time::Duration;
use thiserror::Error;

/// Error type for transport, retry and RPC operations.
///
/// The `Display` output of every variant is short enough to show to the
/// technician as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No response arrived within the bounded wait.
    #[error("Request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// DNS, connection or TLS failure.
    #[error("Connection error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Message from the body, or `HTTP Error: <status>`.
        message: String,
    },

    /// The body could not be decoded.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The JSON-RPC envelope carried an `error` member.
    #[error("{message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Most specific message the server gave.
        message: String,
    },

    /// An authenticated call was made without a stored session.
    #[error("No active session")]
    NoActiveSession,

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// HTTP status, for [`FetchError::HttpStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if another attempt might succeed.
    ///
    /// Authentication, permission and not-found statuses are final, as are
    /// failures that happen before anything is sent.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpStatus { status, .. } => !matches!(status, 401 | 403 | 404),
            Self::Timeout(_) | Self::Network(_) | Self::MalformedResponse(_) => true,
            Self::Rpc { .. } | Self::NoActiveSession | Self::InvalidRequest(_) => false,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
