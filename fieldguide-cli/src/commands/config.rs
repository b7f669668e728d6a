//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use fieldguide_store::{default_config_dir, default_config_path, default_session_path, init_config};
use tracing::info;

use super::{emit, resolve_config};
use crate::Cli;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Write a default config file if none exists.
    Init,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Init => init(cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli).await?;
    emit(cli, &config, |f| f.format_config(&config))
}

fn show_paths(cli: &Cli) -> Result<()> {
    let paths = serde_json::json!({
        "config_dir": default_config_dir().display().to_string(),
        "config_file": default_config_path().display().to_string(),
        "session_file": default_session_path().display().to_string(),
    });

    emit(cli, &paths, |_| {
        format!(
            "Configuration Paths\n{}\n\nConfig dir:   {}\nConfig file:  {}\nSession file: {}",
            "─".repeat(40),
            default_config_dir().display(),
            default_config_path().display(),
            default_session_path().display(),
        )
    })
}

async fn init(cli: &Cli) -> Result<()> {
    let path = default_config_path();
    let created = init_config(&path).await?;
    if created {
        info!(path = %path.display(), "Config file created");
    }

    let output = serde_json::json!({
        "path": path.display().to_string(),
        "created": created,
    });
    emit(cli, &output, |_| {
        if created {
            format!("Created {}", path.display())
        } else {
            format!("Config file already exists: {}", path.display())
        }
    })
}
