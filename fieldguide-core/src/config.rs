//! Connection settings for the Odoo server.
//!
//! Loading from disk and the environment lives in `fieldguide-store`; this
//! module only defines the shape and the defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

use crate::error::CoreError;

/// Default Odoo base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8069";

/// Default Odoo database name.
pub const DEFAULT_DB_NAME: &str = "odoo_db";

/// Default per-attempt timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay between retries in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

// ============================================================================
// API Config
// ============================================================================

/// Settings consumed by the HTTP client and the service façade.
///
/// Field names accept both the snake_case form and the upper-case option
/// names (`BASE_URL`, `DB_NAME`, `TIMEOUT`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server root, e.g. `https://erp.example.com`.
    #[serde(alias = "BASE_URL")]
    pub base_url: String,

    /// Database passed to `/web/session/authenticate`.
    #[serde(alias = "DB_NAME")]
    pub db_name: String,

    /// Bounded wait for a single attempt, in milliseconds.
    #[serde(alias = "TIMEOUT")]
    pub timeout_ms: u64,

    /// Retries after the first attempt.
    #[serde(alias = "MAX_RETRIES")]
    pub max_retries: u32,

    /// Linear backoff unit, in milliseconds.
    #[serde(alias = "RETRY_DELAY")]
    pub retry_delay_ms: u64,

    /// Headers sent with every request.
    #[serde(alias = "DEFAULT_HEADERS")]
    pub default_headers: BTreeMap<String, String>,
}

impl ApiConfig {
    /// Creates a config pointing at `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the database name.
    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into();
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the retry budget and backoff unit.
    pub fn with_retries(mut self, max_retries: u32, retry_delay_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    /// Per-attempt timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Retry base delay as a [`Duration`].
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Joins an endpoint path onto the base URL.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    /// Checks that the config can be used to reach a server.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the base URL is not an
    /// absolute http(s) URL, the database name is blank, or the timeout is
    /// zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| CoreError::InvalidConfig(format!("base_url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::InvalidConfig(format!(
                "base_url: unsupported scheme '{}'",
                url.scheme()
            )));
        }
        if self.db_name.trim().is_empty() {
            return Err(CoreError::InvalidConfig("db_name is empty".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(CoreError::InvalidConfig("timeout must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            db_name: DEFAULT_DB_NAME.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            default_headers,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
