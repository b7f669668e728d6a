//! HTTP client abstractions.

use fieldguide_core::ApiConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;
use crate::retry::{Parsed, RetryPolicy, fetch_with_retry};
use crate::transport::{HttpTransport, RawRequest, Transport};

/// HTTP client bound to one server, with retry capabilities.
#[derive(Debug, Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    default_headers: HeaderMap,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Creates a client over a fresh [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] if a configured default header
    /// is not a valid header, or [`FetchError::Network`] if the HTTP stack
    /// cannot be initialised.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        Self::with_transport(config, Arc::new(HttpTransport::new()?))
    }

    /// Creates a client over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] if a configured default header
    /// is not a valid header.
    pub fn with_transport(
        config: &ApiConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, FetchError> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FetchError::InvalidRequest(format!("header name '{name}': {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| FetchError::InvalidRequest(format!("header '{name}': {e}")))?;
            default_headers.insert(header_name, header_value);
        }

        Ok(Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_headers,
            timeout: config.timeout(),
            retry: RetryPolicy::from_config(config),
        })
    }

    /// Sets the retry policy for this client.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// The retry policy in effect.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// The underlying transport.
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Absolute URL for `endpoint`.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Builds a JSON POST with the default headers, then `headers` on top.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] if `body` cannot be serialized.
    pub fn build_post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        headers: HeaderMap,
    ) -> Result<RawRequest, FetchError> {
        Ok(RawRequest::post_json(self.url(endpoint), body, self.timeout)?
            .with_headers(self.default_headers.clone())
            .with_headers(headers))
    }

    /// POSTs `body` to `endpoint` under the client's retry policy.
    ///
    /// # Errors
    ///
    /// Returns the failure of the last attempt made.
    pub async fn post<T, B>(&self, endpoint: &str, body: &B, headers: HeaderMap) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_with_headers(endpoint, body, headers)
            .await
            .map(|parsed| parsed.body)
    }

    /// Like [`HttpClient::post`] but keeps the response status and headers.
    ///
    /// # Errors
    ///
    /// Returns the failure of the last attempt made.
    pub async fn post_with_headers<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        headers: HeaderMap,
    ) -> Result<Parsed<T>, FetchError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_post(endpoint, body, headers)?;
        fetch_with_retry(self.transport.as_ref(), &request, &self.retry).await
    }

    /// POSTs `body` exactly once, ignoring the retry policy.
    ///
    /// # Errors
    ///
    /// Returns the failure of the single attempt.
    pub async fn post_once<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        headers: HeaderMap,
    ) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_post(endpoint, body, headers)?;
        fetch_with_retry(self.transport.as_ref(), &request, &RetryPolicy::no_retry())
            .await
            .map(|parsed| parsed.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = HttpClient::new(&ApiConfig::new("https://erp.example.com/")).unwrap();
        assert_eq!(
            client.url("/web/session/check"),
            "https://erp.example.com/web/session/check"
        );
    }

    #[test]
    fn test_build_post_merges_headers() {
        let client = HttpClient::new(&ApiConfig::new("https://erp.example.com")).unwrap();
        let mut extra = HeaderMap::new();
        extra.insert(COOKIE, HeaderValue::from_static("session_id=abc"));

        let request = client
            .build_post("/web/session/check", &serde_json::json!({}), extra)
            .unwrap();

        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert_eq!(request.headers[ACCEPT], "application/json");
        assert_eq!(request.headers[COOKIE], "session_id=abc");
        assert_eq!(request.timeout, Duration::from_millis(30_000));
    }

    #[test]
    fn test_invalid_default_header_rejected() {
        let mut config = ApiConfig::new("https://erp.example.com");
        config
            .default_headers
            .insert("X-Bad".to_string(), "line\nbreak".to_string());
        let err = HttpClient::new(&config).unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = ApiConfig::new("https://erp.example.com").with_retries(5, 250);
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(
            *client.retry_policy(),
            RetryPolicy::new(5, Duration::from_millis(250))
        );
    }
}
