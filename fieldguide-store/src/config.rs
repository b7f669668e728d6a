//! Configuration management.
//!
//! Precedence, lowest first: built-in defaults, the JSON config file, then
//! `FIELDGUIDE_*` environment variables.

use fieldguide_core::ApiConfig;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_config_path, load_json, save_json};

/// Overrides [`ApiConfig::base_url`].
pub const ENV_BASE_URL: &str = "FIELDGUIDE_BASE_URL";
/// Overrides [`ApiConfig::db_name`].
pub const ENV_DB_NAME: &str = "FIELDGUIDE_DB_NAME";
/// Overrides [`ApiConfig::timeout_ms`].
pub const ENV_TIMEOUT_MS: &str = "FIELDGUIDE_TIMEOUT_MS";
/// Overrides [`ApiConfig::max_retries`].
pub const ENV_MAX_RETRIES: &str = "FIELDGUIDE_MAX_RETRIES";
/// Overrides [`ApiConfig::retry_delay_ms`].
pub const ENV_RETRY_DELAY_MS: &str = "FIELDGUIDE_RETRY_DELAY_MS";

/// Loads the config from the default path and the process environment.
///
/// # Errors
///
/// See [`load_config_with`].
pub async fn load_config() -> Result<ApiConfig, StoreError> {
    load_config_with(&default_config_path(), |key| std::env::var(key).ok()).await
}

/// Loads the config from `path`, then applies overrides from `env`.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Returns [`StoreError`] if the file exists but cannot be parsed, an
/// override does not parse, or the result fails validation.
pub async fn load_config_with<F>(path: &Path, env: F) -> Result<ApiConfig, StoreError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = load_config_file(path).await?;
    let config = apply_env_overrides(config, env)?;
    config.validate()?;
    Ok(config)
}

/// Reads the config file, returning defaults when it does not exist.
///
/// # Errors
///
/// Returns [`StoreError`] if the file exists but cannot be read or parsed.
pub async fn load_config_file(path: &Path) -> Result<ApiConfig, StoreError> {
    match load_json(path).await {
        Ok(config) => {
            info!(path = %path.display(), "Loaded configuration");
            Ok(config)
        }
        Err(e) if e.is_not_found() => {
            debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(ApiConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// Applies `FIELDGUIDE_*` overrides looked up through `env`.
///
/// # Errors
///
/// Returns [`StoreError::InvalidValue`] for a numeric override that does
/// not parse.
pub fn apply_env_overrides<F>(mut config: ApiConfig, env: F) -> Result<ApiConfig, StoreError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(url) = lookup(ENV_BASE_URL) {
        config.base_url = url;
    }
    if let Some(db) = lookup(ENV_DB_NAME) {
        config.db_name = db;
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
        config.timeout_ms = parse_number(ENV_TIMEOUT_MS, &raw)?;
    }
    if let Some(raw) = lookup(ENV_MAX_RETRIES) {
        config.max_retries = parse_number(ENV_MAX_RETRIES, &raw)?;
    }
    if let Some(raw) = lookup(ENV_RETRY_DELAY_MS) {
        config.retry_delay_ms = parse_number(ENV_RETRY_DELAY_MS, &raw)?;
    }
    Ok(config)
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T, StoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| StoreError::InvalidValue {
        key: key.to_string(),
        reason: format!("'{raw}': {e}"),
    })
}

/// Writes `config` to `path`.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be written.
pub async fn save_config(path: &Path, config: &ApiConfig) -> Result<(), StoreError> {
    save_json(path, config).await?;
    info!(path = %path.display(), "Saved configuration");
    Ok(())
}

/// Writes a default config to `path` unless one exists.
///
/// Returns true if a file was written.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be written.
pub async fn init_config(path: &Path) -> Result<bool, StoreError> {
    if tokio::fs::try_exists(path).await? {
        debug!(path = %path.display(), "Config file already exists");
        return Ok(false);
    }
    save_config(path, &ApiConfig::default()).await?;
    Ok(true)
}
