//! Orders command - list, show and update work orders.

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use fieldguide_core::OrderState;
use fieldguide_core::query::{OrderFilters, OrderStatistics};
use serde_json::{Map, Value};
use tracing::info;

use super::{connect, emit, require};
use crate::Cli;
use crate::output::{OrdersOutput, UpdateOutput};

/// Order states accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderStateArg {
    /// In progress.
    Progress,
    /// Finished.
    Done,
    /// Cancelled.
    Cancel,
}

impl From<OrderStateArg> for OrderState {
    fn from(arg: OrderStateArg) -> Self {
        match arg {
            OrderStateArg::Progress => OrderState::Progress,
            OrderStateArg::Done => OrderState::Done,
            OrderStateArg::Cancel => OrderState::Cancel,
        }
    }
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    /// Guide id.
    pub guide: i64,

    /// Only orders in this state.
    #[arg(long, short)]
    pub state: Option<OrderStateArg>,

    /// Search order, subscription and type names.
    #[arg(long)]
    pub search: Option<String>,

    /// Include counts per state.
    #[arg(long)]
    pub stats: bool,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Order id.
    pub id: i64,

    /// Show contract and Wi-Fi passwords in clear text.
    #[arg(long)]
    pub show_secrets: bool,
}

/// Arguments for the update-order command.
#[derive(Args)]
pub struct UpdateOrderArgs {
    /// Order id.
    pub id: i64,

    /// Replace the order note.
    #[arg(long)]
    pub note: Option<String>,

    /// Set a field, as `key=value`. JSON values are sent as parsed.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub fields: Vec<(String, Value)>,
}

/// Runs the orders command.
pub async fn list(args: &OrdersArgs, cli: &Cli) -> Result<()> {
    let service = connect(cli).await?;
    let all = require(service.get_orders_by_guide(args.guide).await)?;

    let filters = OrderFilters {
        state: args.state.map(OrderState::from),
        search: args.search.clone(),
    };
    let output = OrdersOutput {
        guide_id: args.guide,
        orders: filters.apply(&all),
        statistics: args.stats.then(|| OrderStatistics::from_orders(&all)),
    };
    emit(cli, &output, |f| f.format_orders(&output))
}

/// Runs the order command.
pub async fn show(args: &OrderArgs, cli: &Cli) -> Result<()> {
    let service = connect(cli).await?;
    let order = require(service.get_order_detail(args.id).await)?;
    emit(cli, &order, |f| f.format_order_detail(&order, args.show_secrets))
}

/// Runs the update-order command.
pub async fn update(args: &UpdateOrderArgs, cli: &Cli) -> Result<()> {
    let patch = build_patch(args.note.as_deref(), &args.fields);
    if patch.is_empty() {
        bail!("Nothing to update: pass --note or --set key=value");
    }

    let service = connect(cli).await?;
    require(service.update_order(args.id, &patch).await)?;
    info!(order_id = args.id, fields = patch.len(), "Order updated");

    let output = UpdateOutput {
        order_id: args.id,
        updated: patch.keys().cloned().collect(),
    };
    emit(cli, &output, |f| f.format_update(&output))
}

/// Merges `--note` and `--set` into one patch; later keys win.
pub fn build_patch(note: Option<&str>, fields: &[(String, Value)]) -> Map<String, Value> {
    let mut patch = Map::new();
    if let Some(note) = note {
        patch.insert("note".to_string(), Value::String(note.to_string()));
    }
    for (key, value) in fields {
        patch.insert(key.clone(), value.clone());
    }
    patch
}

/// Parses `key=value`, reading the value as JSON when it is valid JSON.
pub fn parse_assignment(input: &str) -> Result<(String, Value), String> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{input}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{input}'"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("is_ipv6=true").unwrap(),
            ("is_ipv6".to_string(), json!(true))
        );
        assert_eq!(
            parse_assignment("contract_mac=AA:BB:CC:DD:EE:FF").unwrap(),
            ("contract_mac".to_string(), json!("AA:BB:CC:DD:EE:FF"))
        );
        assert_eq!(
            parse_assignment("serie_ont=0912").unwrap(),
            ("serie_ont".to_string(), json!("0912"))
        );
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn test_build_patch() {
        let fields = vec![("note".to_string(), json!("from --set")), ("plan".to_string(), json!("100M"))];
        let patch = build_patch(Some("from --note"), &fields);

        assert_eq!(patch["note"], "from --set");
        assert_eq!(patch["plan"], "100M");
        assert!(build_patch(None, &[]).is_empty());
    }
}
