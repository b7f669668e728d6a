//! Façade errors.
//!
//! These never leave the crate's public operations; they are logged and
//! turned into a failed `DomainResult`.

use fieldguide_fetch::FetchError;
use fieldguide_store::StoreError;
use thiserror::Error;

/// Failures inside a façade operation.
#[derive(Debug, Error)]
pub enum OdooError {
    /// Transport, retry or RPC failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Local session storage failure.
    #[error("Session storage error: {0}")]
    Store(#[from] StoreError),

    /// Authentication was refused.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Input rejected before any request was made.
    #[error("{0}")]
    InvalidInput(String),

    /// The call succeeded but returned nothing usable.
    #[error("{0}")]
    Rejected(&'static str),

    /// The result did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
}
