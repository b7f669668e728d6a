//! Warehouse command - stock on hand.

use anyhow::Result;
use clap::{Args, ValueEnum};
use fieldguide_core::query::{StockFilters, StockSort, WarehouseStatistics};

use super::{connect, emit, require};
use crate::Cli;
use crate::output::WarehouseOutput;

/// Sort key for stock rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Product name, A to Z.
    Name,
    /// Quantity, largest first.
    Quantity,
}

/// Arguments for the warehouse command.
#[derive(Args)]
pub struct WarehouseArgs {
    /// Search product names.
    #[arg(long)]
    pub search: Option<String>,

    /// Only serial-tracked products.
    #[arg(long)]
    pub with_serials: bool,

    /// Only products with at least this quantity.
    #[arg(long)]
    pub min_quantity: Option<f64>,

    /// Sort rows.
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Reverse the default direction of --sort.
    #[arg(long, requires = "sort")]
    pub reverse: bool,

    /// List serial numbers under each product.
    #[arg(long)]
    pub serials: bool,

    /// Include totals.
    #[arg(long)]
    pub stats: bool,
}

impl WarehouseArgs {
    /// Builds the stock filters these arguments describe.
    pub fn filters(&self) -> StockFilters {
        StockFilters {
            search: self.search.clone(),
            has_serials: self.with_serials,
            min_quantity: self.min_quantity,
            sort: self.sort.map(|key| match key {
                SortKey::Name => StockSort::Name { ascending: !self.reverse },
                SortKey::Quantity => StockSort::Quantity { ascending: self.reverse },
            }),
        }
    }
}

/// Runs the warehouse command.
pub async fn run(args: &WarehouseArgs, cli: &Cli) -> Result<()> {
    let service = connect(cli).await?;
    let warehouse = require(service.get_warehouse().await)?;

    let output = WarehouseOutput {
        location_id: warehouse.location_id,
        location_name: warehouse.location_name.clone(),
        stocks: args.filters().apply(&warehouse.stocks),
        statistics: args.stats.then(|| WarehouseStatistics::from_stocks(&warehouse.stocks)),
    };
    emit(cli, &output, |f| f.format_warehouse(&output, args.serials))
}
