//! JSON output formatting.

use anyhow::Result;
use fieldguide_core::query::{GuideStatistics, OrderStatistics, WarehouseStatistics};
use fieldguide_core::{StockItem, User, WorkGuide, WorkOrder};
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// Session state after login, logout or whoami.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutput {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Filtered guides.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidesOutput {
    pub guides: Vec<WorkGuide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<GuideStatistics>,
}

/// Filtered orders of one guide.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersOutput {
    pub guide_id: i64,
    pub orders: Vec<WorkOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<OrderStatistics>,
}

/// Fields written by update-order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutput {
    pub order_id: i64,
    pub updated: Vec<String>,
}

/// Filtered warehouse stock.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseOutput {
    pub location_id: i64,
    pub location_name: String,
    pub stocks: Vec<StockItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<WarehouseStatistics>,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}
