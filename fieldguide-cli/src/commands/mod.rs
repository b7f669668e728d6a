//! CLI command implementations.

pub mod auth;
pub mod config;
pub mod guides;
pub mod orders;
pub mod warehouse;

use anyhow::Result;
use fieldguide_core::{ApiConfig, DomainResult};
use fieldguide_odoo::OdooService;
use fieldguide_store::{FileStore, SessionStore, default_session_path, load_config};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Loads the config and applies `--base-url` / `--db`.
pub async fn resolve_config(cli: &Cli) -> Result<ApiConfig> {
    let mut config = load_config().await?;
    if let Some(url) = &cli.base_url {
        config.base_url.clone_from(url);
    }
    if let Some(db) = &cli.db {
        config.db_name.clone_from(db);
    }
    config.validate()?;
    debug!(base_url = %config.base_url, db = %config.db_name, "Resolved configuration");
    Ok(config)
}

/// Builds the service over the on-disk session.
pub async fn connect(cli: &Cli) -> Result<OdooService> {
    let config = resolve_config(cli).await?;
    let session = SessionStore::new(Arc::new(FileStore::open(default_session_path()).await));
    Ok(OdooService::new(config, session)?)
}

/// Turns a failed result into an error carrying its message.
pub fn require<T>(result: DomainResult<T>) -> Result<T> {
    result.into_result().map_err(anyhow::Error::msg)
}

/// Prints `data` as JSON or through `text`.
pub fn emit<T, F>(cli: &Cli, data: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&TextFormatter) -> String,
{
    match cli.format {
        OutputFormat::Text => println!("{}", text(&TextFormatter::new(!cli.no_color))),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(data)?),
    }
    Ok(())
}
