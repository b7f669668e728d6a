//! Single-attempt HTTP transport.
//!
//! A transport sends one request, waits at most the request's timeout, and
//! hands back the raw response. It does not look at the status code, retry,
//! or touch any session state.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::FetchError;

/// User agent string for FieldGuide.
const USER_AGENT: &str = concat!("FieldGuide/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Request / Response
// ============================================================================

/// A fully-built request.
#[derive(Debug, Clone)]
pub struct RawRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Headers to send.
    pub headers: HeaderMap,
    /// Body bytes, if any.
    pub body: Option<Vec<u8>>,
    /// Bounded wait for this attempt.
    pub timeout: Duration,
}

impl RawRequest {
    /// Creates a bodiless request.
    pub fn new(method: Method, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
            timeout,
        }
    }

    /// Creates a POST with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] if `body` cannot be serialized.
    pub fn post_json<B: Serialize + ?Sized>(
        url: impl Into<String>,
        body: &B,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let bytes =
            serde_json::to_vec(body).map_err(|e| FetchError::InvalidRequest(e.to_string()))?;
        let mut request = Self::new(Method::POST, url, timeout);
        request.body = Some(bytes);
        Ok(request)
    }

    /// Merges `headers` into the request, replacing existing names.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        for (name, value) in &headers {
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Sets a single header.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] for an invalid name or value.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, FetchError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| FetchError::InvalidRequest(format!("header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| FetchError::InvalidRequest(format!("header '{name}': {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

/// An unparsed response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response, mainly for scripted transports.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// First value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body as (lossy) UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MalformedResponse`] if the body is not valid
    /// JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends a single request.
///
/// Implementations must fail with [`FetchError::Timeout`] when no response
/// arrives within [`RawRequest::timeout`] and with [`FetchError::Network`]
/// for connection-level faults. Any HTTP status is a successful send.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Sends `request` once.
    async fn send(&self, request: &RawRequest) -> Result<RawResponse, FetchError>;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Creates a transport with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, FetchError> {
        let inner = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { inner })
    }

    /// Wraps an existing client.
    pub fn from_client(inner: Client) -> Self {
        Self { inner }
    }

    async fn send_inner(&self, request: &RawRequest) -> Result<RawResponse, reqwest::Error> {
        let mut builder = self
            .inner
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: &RawRequest) -> Result<RawResponse, FetchError> {
        debug!(timeout = ?request.timeout, "Sending request");

        // Dropping the in-flight future on expiry cancels the request.
        match tokio::time::timeout(request.timeout, self.send_inner(request)).await {
            Ok(Ok(response)) => {
                debug!(status = %response.status, bytes = response.body.len(), "Response received");
                Ok(response)
            }
            Ok(Err(e)) if e.is_timeout() => Err(FetchError::Timeout(request.timeout)),
            Ok(Err(e)) => Err(FetchError::Network(e.to_string())),
            Err(_elapsed) => {
                debug!("Request timed out");
                Err(FetchError::Timeout(request.timeout))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_json_sets_body() {
        let request = RawRequest::post_json(
            "http://localhost/x",
            &serde_json::json!({"a": 1}),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body.as_deref(), Some(br#"{"a":1}"#.as_slice()));
    }

    #[test]
    fn test_with_header_rejects_invalid_value() {
        let request = RawRequest::new(Method::GET, "http://localhost", Duration::from_secs(1));
        assert!(request.clone().with_header("Cookie", "a=b").is_ok());
        assert!(request.with_header("Cookie", "bad\nvalue").is_err());
    }

    #[test]
    fn test_raw_response_helpers() {
        let mut response = RawResponse::new(200, r#"{"ok": true}"#);
        response
            .headers
            .insert("set-cookie", HeaderValue::from_static("session_id=abc"));

        assert!(response.is_success());
        assert_eq!(response.header("set-cookie"), Some("session_id=abc"));
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["ok"], true);
        assert!(response.json::<Vec<i32>>().is_err());
    }
}
