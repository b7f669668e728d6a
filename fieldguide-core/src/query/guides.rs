//! Helpers over fetched work guides.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

use super::matches_query;
use crate::models::{GuideState, WorkGuide};

/// Guides scheduled on `date`.
pub fn filter_by_date(guides: &[WorkGuide], date: NaiveDate) -> Vec<WorkGuide> {
    guides
        .iter()
        .filter(|g| g.scheduled_at().is_some_and(|dt| dt.date() == date))
        .cloned()
        .collect()
}

/// Guides in `state`.
pub fn filter_by_state(guides: &[WorkGuide], state: GuideState) -> Vec<WorkGuide> {
    guides.iter().filter(|g| g.state == state).cloned().collect()
}

/// Guides whose name or team name contains `query`.
pub fn search(guides: &[WorkGuide], query: &str) -> Vec<WorkGuide> {
    guides
        .iter()
        .filter(|g| matches_query(query, [g.name.as_str(), g.team_name().unwrap_or_default()]))
        .cloned()
        .collect()
}

/// Sorts by scheduled date; newest first unless `ascending`.
///
/// Guides with unparseable dates go last in both directions.
pub fn sort_by_date(guides: &[WorkGuide], ascending: bool) -> Vec<WorkGuide> {
    let mut sorted = guides.to_vec();
    sorted.sort_by(|a, b| match (a.scheduled_at(), b.scheduled_at()) {
        (Some(x), Some(y)) if ascending => x.cmp(&y),
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

// ============================================================================
// Filters
// ============================================================================

/// Combined guide filters, applied as date, then state, then search.
#[derive(Debug, Clone, Default)]
pub struct GuideFilters {
    /// Only guides on this day.
    pub date: Option<NaiveDate>,
    /// Only guides in this state.
    pub state: Option<GuideState>,
    /// Free-text search.
    pub search: Option<String>,
}

impl GuideFilters {
    /// Applies every set filter.
    pub fn apply(&self, guides: &[WorkGuide]) -> Vec<WorkGuide> {
        let mut result = guides.to_vec();
        if let Some(date) = self.date {
            result = filter_by_date(&result, date);
        }
        if let Some(state) = self.state {
            result = filter_by_state(&result, state);
        }
        if let Some(query) = &self.search {
            result = search(&result, query);
        }
        result
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Guide counts per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GuideStatistics {
    /// All guides.
    pub total: usize,
    /// Open guides.
    pub open: usize,
    /// Closed guides.
    pub closed: usize,
    /// Draft guides.
    pub draft: usize,
    /// Done guides.
    pub done: usize,
}

impl GuideStatistics {
    /// Counts guides per state.
    pub fn from_guides(guides: &[WorkGuide]) -> Self {
        guides.iter().fold(
            Self {
                total: guides.len(),
                ..Self::default()
            },
            |mut stats, guide| {
                match guide.state {
                    GuideState::Open => stats.open += 1,
                    GuideState::Closed => stats.closed += 1,
                    GuideState::Draft => stats.draft += 1,
                    GuideState::Done => stats.done += 1,
                    GuideState::Unknown => {}
                }
                stats
            },
        )
    }
}
