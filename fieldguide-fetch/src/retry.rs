//! Retry policy for HTTP requests.
//!
//! Attempts are strictly sequential. Between attempts the caller sleeps
//! `base_delay * attempt` (linear backoff, 1-indexed).

use fieldguide_core::ApiConfig;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::transport::{RawRequest, RawResponse, Transport};

// ============================================================================
// Retry Policy
// ============================================================================

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Backoff unit.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a retry policy.
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// A single attempt, no waiting.
    pub fn no_retry() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Reads `max_retries` and `retry_delay_ms` from the config.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay())
    }

    /// Total attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay to wait after failed attempt number `attempt` (1-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Determines if a failed attempt should be retried.
    pub fn should_retry(&self, error: &FetchError) -> bool {
        error.is_retryable()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}

// ============================================================================
// Retrying Send
// ============================================================================

/// A successfully decoded response.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    /// Status code (always 2xx).
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Decoded body.
    pub body: T,
}

/// Sends `request` under `policy`, returning the decoded body.
///
/// # Errors
///
/// Returns the first non-retryable failure, or the last failure once every
/// attempt has been used.
pub async fn send_with_retry<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: &RawRequest,
    policy: &RetryPolicy,
) -> Result<T, FetchError> {
    fetch_with_retry(transport, request, policy)
        .await
        .map(|parsed| parsed.body)
}

/// Like [`send_with_retry`] but keeps the status and headers.
///
/// # Errors
///
/// See [`send_with_retry`].
pub async fn fetch_with_retry<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: &RawRequest,
    policy: &RetryPolicy,
) -> Result<Parsed<T>, FetchError> {
    let max_attempts = policy.max_attempts();
    let mut attempt = 0;

    loop {
        attempt += 1;
        debug!(url = %request.url, attempt, max_attempts, "Making request");

        let error = match transport.send(request).await.and_then(decode::<T>) {
            Ok(parsed) => return Ok(parsed),
            Err(e) => e,
        };

        if !policy.should_retry(&error) {
            debug!(error = %error, attempt, "Request failed, not retrying");
            return Err(error);
        }
        if attempt >= max_attempts {
            warn!(error = %error, attempts = attempt, "Request failed, retries exhausted");
            return Err(error);
        }

        let delay = policy.delay_for_attempt(attempt);
        warn!(
            error = %error,
            attempt,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Request failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

/// Classifies a raw response by status and decodes its body.
fn decode<T: DeserializeOwned>(response: RawResponse) -> Result<Parsed<T>, FetchError> {
    if !response.is_success() {
        let status = response.status.as_u16();
        let message = serde_json::from_slice::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|body| body_message(&body))
            .unwrap_or_else(|| format!("HTTP Error: {status}"));
        return Err(FetchError::HttpStatus { status, message });
    }

    let body = response.json::<T>()?;
    Ok(Parsed {
        status: response.status,
        headers: response.headers,
        body,
    })
}

/// Pulls `message`, `error`, or `error.message` out of an error body.
fn body_message(body: &serde_json::Value) -> Option<String> {
    let text = |v: &serde_json::Value| v.as_str().filter(|s| !s.is_empty()).map(str::to_string);

    body.get("message")
        .and_then(text)
        .or_else(|| body.get("error").and_then(text))
        .or_else(|| body.pointer("/error/message").and_then(text))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1000));

        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(3000));
    }

    #[test]
    fn test_no_retry() {
        let policy = RetryPolicy::no_retry();
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.delay_for_attempt(1), Duration::ZERO);
    }

    #[test]
    fn test_decode_surfaces_body_message() {
        let response = RawResponse::new(500, r#"{"message": "Odoo is restarting"}"#);
        let err = decode::<serde_json::Value>(response).unwrap_err();
        assert_eq!(
            err,
            FetchError::HttpStatus {
                status: 500,
                message: "Odoo is restarting".to_string()
            }
        );

        let response = RawResponse::new(502, r#"{"error": "Bad gateway"}"#);
        let err = decode::<serde_json::Value>(response).unwrap_err();
        assert_eq!(err.to_string(), "Bad gateway");
    }

    #[test]
    fn test_decode_generic_status_message() {
        let response = RawResponse::new(503, "<html>Service Unavailable</html>");
        let err = decode::<serde_json::Value>(response).unwrap_err();
        assert_eq!(err.to_string(), "HTTP Error: 503");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_decode_malformed_success_body() {
        let response = RawResponse::new(200, "not json");
        let err = decode::<serde_json::Value>(response).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }
}
