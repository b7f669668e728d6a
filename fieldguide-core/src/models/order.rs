//! Work orders.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::guide::Many2One;
use super::odoo::{false_as_default, false_as_empty, false_as_none};
use crate::dates;

// ============================================================================
// Order State
// ============================================================================

/// Workflow state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    /// In progress.
    #[default]
    Progress,
    /// Finished.
    Done,
    /// Cancelled.
    Cancel,
    /// A state this client does not know about.
    #[serde(other)]
    Unknown,
}

impl OrderState {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Progress => "In progress",
            Self::Done => "Done",
            Self::Cancel => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns all known states.
    pub fn all() -> &'static [OrderState] {
        &[Self::Progress, Self::Done, Self::Cancel]
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Work Order
// ============================================================================

/// A work order as listed by `get_orders_by_guide`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Order id.
    pub id: i64,
    /// Order reference.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub name: String,
    /// Workflow state.
    #[serde(default)]
    pub state: OrderState,
    /// Order type (installation, repair, ...).
    #[serde(default, deserialize_with = "false_as_none")]
    pub type_id: Option<Many2One>,
    /// Customer subscription the order belongs to.
    #[serde(default, deserialize_with = "false_as_none")]
    pub subscription_id: Option<Many2One>,
}

impl WorkOrder {
    /// Display name of the order type.
    pub fn type_name(&self) -> Option<&str> {
        self.type_id.as_ref().map(Many2One::name)
    }

    /// Display name of the subscription.
    pub fn subscription_name(&self) -> Option<&str> {
        self.subscription_id.as_ref().map(Many2One::name)
    }
}

// ============================================================================
// Work Order Detail
// ============================================================================

/// Customer contact data attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    /// Customer name.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub name: String,
    /// National id number.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub cedula: String,
    /// Landline.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub telefono: String,
    /// Mobile.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub celular: String,
}

/// A `{ "name": ... }` wrapper used by the ISP block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValue {
    /// The value.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub name: String,
}

/// Current provisioning status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IspStatus {
    /// Status text.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub status: String,
}

/// Time logged on the order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpent {
    /// Duration text, e.g. `02:30`.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub time: String,
}

/// Technical end date, absent while the order is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndDate {
    /// Date text.
    #[serde(default, deserialize_with = "false_as_none")]
    pub date: Option<String>,
}

/// Network configuration of the customer's service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IspInfo {
    /// Core router.
    #[serde(deserialize_with = "false_as_default")]
    pub core: NamedValue,
    /// OLT.
    #[serde(deserialize_with = "false_as_default")]
    pub olt: NamedValue,
    /// OLT card.
    #[serde(deserialize_with = "false_as_default")]
    pub tarjeta: NamedValue,
    /// OLT port.
    #[serde(deserialize_with = "false_as_default")]
    pub puerto: NamedValue,
    /// NAP box.
    #[serde(deserialize_with = "false_as_default")]
    pub nap: NamedValue,
    /// NAP port.
    #[serde(deserialize_with = "false_as_default")]
    pub nap_port: NamedValue,
    /// Assigned IP.
    #[serde(deserialize_with = "false_as_default")]
    pub ip: NamedValue,
    /// ONU model.
    #[serde(deserialize_with = "false_as_default")]
    pub onu_type_id: NamedValue,
    /// Provisioning status.
    #[serde(deserialize_with = "false_as_default")]
    pub current_status: IspStatus,
    /// Logged hours.
    #[serde(deserialize_with = "false_as_default")]
    pub total_hours_spent: TimeSpent,
    /// Technical end date.
    #[serde(deserialize_with = "false_as_default")]
    pub technical_end_date: EndDate,
}

/// GPS position of the installation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    #[serde(default, deserialize_with = "false_as_default")]
    pub latitude: f64,
    /// Longitude in degrees.
    #[serde(default, deserialize_with = "false_as_default")]
    pub longitude: f64,
}

impl Location {
    /// Returns true when the server sent no real coordinates.
    #[allow(clippy::float_cmp)]
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// Full order record returned by `get_order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderDetail {
    /// Order id.
    pub id: i64,
    /// Order reference.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub name: String,
    /// Source document.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub origin: String,
    /// Scheduled date.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub date: String,
    /// Assigned technician.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub technical: String,
    /// Service plan.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub plan: String,
    /// Workflow state.
    #[serde(default)]
    pub state: OrderState,
    /// Contract code.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub code: String,
    /// Customer.
    #[serde(default, deserialize_with = "false_as_default")]
    pub partner: Partner,
    /// Network configuration.
    #[serde(default, deserialize_with = "false_as_default")]
    pub isp: IspInfo,
    /// PPPoE user.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub contract_user: String,
    /// PPPoE password.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub contract_passwd: String,
    /// Wi-Fi SSID.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub wifi_user: String,
    /// Wi-Fi password.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub wifi_passwd: String,
    /// MAC address of the customer equipment.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub contract_mac: String,
    /// ONT serial number.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub serie_ont: String,
    /// Whether the service runs IPv6.
    #[serde(default)]
    pub is_ipv6: bool,
    /// Installation coordinates.
    #[serde(default, deserialize_with = "false_as_default")]
    pub ubicacion: Location,
    /// Technician notes.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub note: String,
}

impl WorkOrderDetail {
    /// Parses the scheduled date.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        dates::parse(&self.date)
    }
}
