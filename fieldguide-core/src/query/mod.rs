//! Client-side filtering, search, sorting and statistics.
//!
//! These are pure functions over collections that were already fetched;
//! they never touch the network.

pub mod guides;
pub mod orders;
pub mod warehouse;

pub use guides::{GuideFilters, GuideStatistics};
pub use orders::{OrderFilters, OrderStatistics};
pub use warehouse::{StockFilters, StockSort, WarehouseStatistics};

use crate::format::normalize_text;

/// Returns true if any candidate contains the (normalized) query.
///
/// A blank query matches everything.
pub(crate) fn matches_query<'a>(query: &str, candidates: impl IntoIterator<Item = &'a str>) -> bool {
    let query = normalize_text(query);
    if query.is_empty() {
        return true;
    }
    candidates
        .into_iter()
        .any(|candidate| normalize_text(candidate).contains(&query))
}
