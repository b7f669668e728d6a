//! Guides command - list and show work guides.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use fieldguide_core::GuideState;
use fieldguide_core::query::guides::sort_by_date;
use fieldguide_core::query::{GuideFilters, GuideStatistics};
use tracing::debug;

use super::{connect, emit, require};
use crate::Cli;
use crate::output::GuidesOutput;

/// Guide states accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GuideStateArg {
    /// Being prepared.
    Draft,
    /// Open for work.
    Open,
    /// Closed.
    Closed,
    /// Completed.
    Done,
}

impl From<GuideStateArg> for GuideState {
    fn from(arg: GuideStateArg) -> Self {
        match arg {
            GuideStateArg::Draft => GuideState::Draft,
            GuideStateArg::Open => GuideState::Open,
            GuideStateArg::Closed => GuideState::Closed,
            GuideStateArg::Done => GuideState::Done,
        }
    }
}

/// Sort direction by scheduled date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

/// Arguments for the guides command.
#[derive(Args)]
pub struct GuidesArgs {
    /// Only guides in this state.
    #[arg(long, short)]
    pub state: Option<GuideStateArg>,

    /// Only guides scheduled on this day (YYYY-MM-DD).
    #[arg(long, short)]
    pub date: Option<NaiveDate>,

    /// Only guides scheduled today.
    #[arg(long, conflicts_with = "date")]
    pub today: bool,

    /// Search guide and team names.
    #[arg(long)]
    pub search: Option<String>,

    /// Sort by scheduled date.
    #[arg(long, default_value = "desc")]
    pub sort: SortOrder,

    /// Include counts per state.
    #[arg(long)]
    pub stats: bool,
}

/// Runs the guides command.
pub async fn list(args: &GuidesArgs, cli: &Cli) -> Result<()> {
    let service = connect(cli).await?;
    let all = require(service.get_all_guides().await)?;

    let filters = GuideFilters {
        date: if args.today {
            Some(Local::now().date_naive())
        } else {
            args.date
        },
        state: args.state.map(GuideState::from),
        search: args.search.clone(),
    };
    let guides = sort_by_date(&filters.apply(&all), args.sort == SortOrder::Asc);
    debug!(total = all.len(), shown = guides.len(), "Filtered guides");

    let output = GuidesOutput {
        statistics: args.stats.then(|| GuideStatistics::from_guides(&all)),
        guides,
    };
    emit(cli, &output, |f| f.format_guides(&output))
}

/// Runs the guide command.
pub async fn show(id: i64, cli: &Cli) -> Result<()> {
    let service = connect(cli).await?;
    let guide = require(service.get_guide(id).await)?;
    let now = Local::now().naive_local();
    emit(cli, &guide, |f| f.format_guide(&guide, now))
}
