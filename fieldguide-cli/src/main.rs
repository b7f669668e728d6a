// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `FieldGuide` CLI - work guides, orders and stock from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Log in (prompts for the password when --password is not given)
//! fieldguide login tech@example.com
//!
//! # Today's open guides, newest first
//! fieldguide guides --state open --date 2024-03-15
//!
//! # Orders of a guide, with counts per state
//! fieldguide orders 12 --stats
//!
//! # Add a note to an order
//! fieldguide update-order 42 --note "ONT replaced"
//!
//! # Serial-tracked stock as JSON
//! fieldguide warehouse --with-serials --format json --pretty
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{auth, config, guides, orders, warehouse};

// ============================================================================
// CLI Definition
// ============================================================================

/// `FieldGuide` CLI - Odoo work guides for field technicians.
#[derive(Parser)]
#[command(name = "fieldguide")]
#[command(about = "Odoo work guides for field technicians")]
#[command(long_about = r#"
FieldGuide talks to the Odoo work-guide service on behalf of a field
technician: log in once, then list guides and orders, read and update
order details, and check the stock in your warehouse.

The session is kept in the user config directory until `fieldguide logout`.

Examples:
  fieldguide login tech@example.com    # Start a session
  fieldguide guides --state open       # Open guides
  fieldguide orders 12                 # Orders of guide 12
  fieldguide order 42                  # Order detail
  fieldguide warehouse --stats         # Stock totals
"#)]
#[command(version)]
#[command(author = "FieldGuide Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Odoo server URL, overriding config and environment.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Odoo database, overriding config and environment.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session.
    Login(auth::LoginArgs),

    /// End the session.
    Logout,

    /// Show the logged-in user.
    Whoami(auth::WhoamiArgs),

    /// List work guides.
    #[command(visible_alias = "g")]
    Guides(guides::GuidesArgs),

    /// Show one work guide.
    Guide {
        /// Guide id.
        id: i64,
    },

    /// List the orders of a guide.
    #[command(visible_alias = "o")]
    Orders(orders::OrdersArgs),

    /// Show an order in full.
    Order(orders::OrderArgs),

    /// Update fields of an order.
    UpdateOrder(orders::UpdateOrderArgs),

    /// Show the stock in your warehouse.
    #[command(visible_alias = "w")]
    Warehouse(warehouse::WarehouseArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// The operation failed.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("fieldguide=debug,info")
    } else {
        EnvFilter::new("fieldguide=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result: Result<()> = match &cli.command {
        Commands::Login(args) => auth::login(args, &cli).await,
        Commands::Logout => auth::logout(&cli).await,
        Commands::Whoami(args) => auth::whoami(args, &cli).await,
        Commands::Guides(args) => guides::list(args, &cli).await,
        Commands::Guide { id } => guides::show(*id, &cli).await,
        Commands::Orders(args) => orders::list(args, &cli).await,
        Commands::Order(args) => orders::show(args, &cli).await,
        Commands::UpdateOrder(args) => orders::update(args, &cli).await,
        Commands::Warehouse(args) => warehouse::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e}");
            }
            ExitCode::Error
        }
    };
    std::process::exit(code as i32);
}
