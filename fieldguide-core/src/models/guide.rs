//! Work guides.
//!
//! A guide groups the work orders assigned to one team on one date.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::odoo::{false_as_empty, false_as_none};
use crate::dates;

// ============================================================================
// Many2One
// ============================================================================

/// An Odoo relational reference, sent on the wire as `[id, "display name"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Many2One(pub i64, pub String);

impl Many2One {
    /// Referenced record id.
    pub fn id(&self) -> i64 {
        self.0
    }

    /// Display name of the referenced record.
    pub fn name(&self) -> &str {
        &self.1
    }
}

// ============================================================================
// Guide State
// ============================================================================

/// Workflow state of a guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GuideState {
    /// Being prepared.
    #[default]
    Draft,
    /// Open for work.
    Open,
    /// Closed by the supervisor.
    Closed,
    /// Completed.
    Done,
    /// A state this client does not know about.
    #[serde(other)]
    Unknown,
}

impl GuideState {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Done => "Done",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns all known states.
    pub fn all() -> &'static [GuideState] {
        &[Self::Draft, Self::Open, Self::Closed, Self::Done]
    }
}

impl fmt::Display for GuideState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Work Guide
// ============================================================================

/// A work guide as listed by `get_all_guides`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkGuide {
    /// Guide id.
    pub id: i64,
    /// Guide reference, e.g. `GT/2024/0012`.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub name: String,
    /// Workflow state.
    #[serde(default)]
    pub state: GuideState,
    /// Scheduled date as sent by the server.
    #[serde(default, deserialize_with = "false_as_empty")]
    pub date: String,
    /// Assigned team.
    #[serde(default, deserialize_with = "false_as_none")]
    pub team_id: Option<Many2One>,
}

impl WorkGuide {
    /// Parses the scheduled date.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        dates::parse(&self.date)
    }

    /// Name of the assigned team, if any.
    pub fn team_name(&self) -> Option<&str> {
        self.team_id.as_ref().map(Many2One::name)
    }
}
