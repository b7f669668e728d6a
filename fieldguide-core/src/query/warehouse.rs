//! Helpers over the technician's stock.

use serde::Serialize;
use std::cmp::Ordering;

use super::matches_query;
use crate::format::normalize_text;
use crate::models::StockItem;

/// Products whose name contains `query`.
pub fn search_products(stocks: &[StockItem], query: &str) -> Vec<StockItem> {
    stocks
        .iter()
        .filter(|item| matches_query(query, [item.product_name.as_str()]))
        .cloned()
        .collect()
}

/// Products tracked by serial number.
pub fn filter_with_serials(stocks: &[StockItem]) -> Vec<StockItem> {
    stocks.iter().filter(|item| item.has_serials()).cloned().collect()
}

/// Products with at least `minimum` on hand.
pub fn filter_min_quantity(stocks: &[StockItem], minimum: f64) -> Vec<StockItem> {
    stocks
        .iter()
        .filter(|item| item.total_quantity >= minimum)
        .cloned()
        .collect()
}

/// Sorts by product name, case- and accent-insensitive.
pub fn sort_by_name(stocks: &[StockItem], ascending: bool) -> Vec<StockItem> {
    let mut sorted = stocks.to_vec();
    sorted.sort_by_cached_key(|item| normalize_text(&item.product_name));
    if !ascending {
        sorted.reverse();
    }
    sorted
}

/// Sorts by quantity on hand.
pub fn sort_by_quantity(stocks: &[StockItem], ascending: bool) -> Vec<StockItem> {
    let mut sorted = stocks.to_vec();
    sorted.sort_by(|a, b| {
        let order = a
            .total_quantity
            .partial_cmp(&b.total_quantity)
            .unwrap_or(Ordering::Equal);
        if ascending { order } else { order.reverse() }
    });
    sorted
}

// ============================================================================
// Filters
// ============================================================================

/// Sort key for stock listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockSort {
    /// By product name.
    Name {
        /// A to Z when true.
        ascending: bool,
    },
    /// By quantity on hand.
    Quantity {
        /// Smallest first when true.
        ascending: bool,
    },
}

/// Combined stock filters.
#[derive(Debug, Clone, Default)]
pub struct StockFilters {
    /// Free-text product search.
    pub search: Option<String>,
    /// Only serial-tracked products.
    pub has_serials: bool,
    /// Only products with at least this quantity.
    pub min_quantity: Option<f64>,
    /// Ordering of the result.
    pub sort: Option<StockSort>,
}

impl StockFilters {
    /// Applies every set filter, then sorts.
    pub fn apply(&self, stocks: &[StockItem]) -> Vec<StockItem> {
        let mut result = stocks.to_vec();
        if let Some(query) = &self.search {
            result = search_products(&result, query);
        }
        if self.has_serials {
            result = filter_with_serials(&result);
        }
        if let Some(minimum) = self.min_quantity {
            result = filter_min_quantity(&result, minimum);
        }
        match self.sort {
            Some(StockSort::Name { ascending }) => sort_by_name(&result, ascending),
            Some(StockSort::Quantity { ascending }) => sort_by_quantity(&result, ascending),
            None => result,
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Warehouse totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WarehouseStatistics {
    /// Distinct products.
    pub total_products: usize,
    /// Sum of quantities on hand.
    pub total_quantity: f64,
    /// Products tracked by serial number.
    pub with_serials: usize,
}

impl WarehouseStatistics {
    /// Computes totals over `stocks`.
    pub fn from_stocks(stocks: &[StockItem]) -> Self {
        Self {
            total_products: stocks.len(),
            total_quantity: stocks.iter().map(|item| item.total_quantity).sum(),
            with_serials: stocks.iter().filter(|item| item.has_serials()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SerialNumber;

    fn item(id: i64, name: &str, quantity: f64, serials: usize) -> StockItem {
        StockItem {
            product_id: id,
            product_name: name.to_string(),
            total_quantity: quantity,
            serials: (0..serials)
                .map(|n| SerialNumber {
                    lot_id: n as i64,
                    serial_number: format!("SN{n}"),
                    quantity: 1.0,
                })
                .collect(),
        }
    }

    fn sample() -> Vec<StockItem> {
        vec![
            item(1, "ONU Huawei", 2.0, 2),
            item(2, "cable drop", 150.0, 0),
            item(3, "Conector SC", 40.0, 0),
            item(4, "Router Wi-Fi", 1.0, 1),
        ]
    }

    fn ids(stocks: &[StockItem]) -> Vec<i64> {
        stocks.iter().map(|s| s.product_id).collect()
    }

    #[test]
    fn test_search_and_serials() {
        assert_eq!(ids(&search_products(&sample(), "onu")), vec![1]);
        assert_eq!(ids(&filter_with_serials(&sample())), vec![1, 4]);
        assert_eq!(ids(&filter_min_quantity(&sample(), 40.0)), vec![2, 3]);
    }

    #[test]
    fn test_sorting() {
        assert_eq!(ids(&sort_by_name(&sample(), true)), vec![2, 3, 1, 4]);
        assert_eq!(ids(&sort_by_name(&sample(), false)), vec![4, 1, 3, 2]);
        assert_eq!(ids(&sort_by_quantity(&sample(), false)), vec![2, 3, 1, 4]);
        assert_eq!(ids(&sort_by_quantity(&sample(), true)), vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_combined_filters() {
        let filters = StockFilters {
            search: Some("o".to_string()),
            has_serials: true,
            sort: Some(StockSort::Quantity { ascending: true }),
            ..StockFilters::default()
        };
        assert_eq!(ids(&filters.apply(&sample())), vec![4, 1]);
    }

    #[test]
    fn test_statistics() {
        let stats = WarehouseStatistics::from_stocks(&sample());
        assert_eq!(stats.total_products, 4);
        assert!((stats.total_quantity - 193.0).abs() < f64::EPSILON);
        assert_eq!(stats.with_serials, 2);
    }
}
