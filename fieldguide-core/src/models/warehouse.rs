//! Stock held in the technician's personal warehouse.

use serde::{Deserialize, Serialize};

use super::odoo::{false_as_default, false_as_empty};

/// One serial (lot) of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialNumber {
    /// Lot id.
    #[serde(default, deserialize_with = "false_as_default")]
    pub lot_id: i64,
    /// Serial number text.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub serial_number: String,
    /// Quantity under this serial.
    #[serde(default, deserialize_with = "false_as_default")]
    pub quantity: f64,
}

/// Stock of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    /// Product id.
    #[serde(default, deserialize_with = "false_as_default")]
    pub product_id: i64,
    /// Product name.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub product_name: String,
    /// Quantity on hand.
    #[serde(default, deserialize_with = "false_as_default")]
    pub total_quantity: f64,
    /// Serials, empty for untracked products.
    #[serde(default, deserialize_with = "false_as_default")]
    pub serials: Vec<SerialNumber>,
}

impl StockItem {
    /// Returns true if the product is tracked by serial number.
    pub fn has_serials(&self) -> bool {
        !self.serials.is_empty()
    }
}

/// The technician's stock location and its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseData {
    /// Stock location id.
    #[serde(default, deserialize_with = "false_as_default")]
    pub location_id: i64,
    /// Stock location name.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub location_name: String,
    /// Products on hand.
    #[serde(default, deserialize_with = "false_as_default")]
    pub stocks: Vec<StockItem>,
}
