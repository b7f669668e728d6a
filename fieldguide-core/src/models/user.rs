//! Identity cached after a successful login.

use serde::{Deserialize, Serialize};

use super::odoo::{false_as_default, false_as_empty};

/// The logged-in technician.
///
/// Built from the `/web/session/authenticate` result; only these five
/// fields are kept locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Odoo user id.
    pub uid: i64,
    /// Display name.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub name: String,
    /// Login (usually the e-mail).
    #[serde(default, deserialize_with = "false_as_empty")]
    pub username: String,
    /// Linked partner record.
    #[serde(default, deserialize_with = "false_as_default")]
    pub partner_id: i64,
    /// Current company.
    #[serde(default, deserialize_with = "false_as_default")]
    pub company_id: i64,
}
