//! Helpers over fetched work orders.

use serde::Serialize;

use super::matches_query;
use crate::models::{OrderState, WorkOrder};

/// Orders in `state`.
pub fn filter_by_state(orders: &[WorkOrder], state: OrderState) -> Vec<WorkOrder> {
    orders.iter().filter(|o| o.state == state).cloned().collect()
}

/// Orders whose name, subscription or type contains `query`.
pub fn search(orders: &[WorkOrder], query: &str) -> Vec<WorkOrder> {
    orders
        .iter()
        .filter(|o| {
            matches_query(
                query,
                [
                    o.name.as_str(),
                    o.subscription_name().unwrap_or_default(),
                    o.type_name().unwrap_or_default(),
                ],
            )
        })
        .cloned()
        .collect()
}

/// Combined order filters, applied as state, then search.
#[derive(Debug, Clone, Default)]
pub struct OrderFilters {
    /// Only orders in this state.
    pub state: Option<OrderState>,
    /// Free-text search.
    pub search: Option<String>,
}

impl OrderFilters {
    /// Applies every set filter.
    pub fn apply(&self, orders: &[WorkOrder]) -> Vec<WorkOrder> {
        let mut result = orders.to_vec();
        if let Some(state) = self.state {
            result = filter_by_state(&result, state);
        }
        if let Some(query) = &self.search {
            result = search(&result, query);
        }
        result
    }
}

/// Order counts per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderStatistics {
    /// All orders.
    pub total: usize,
    /// In progress.
    pub progress: usize,
    /// Done.
    pub done: usize,
    /// Cancelled.
    pub cancel: usize,
}

impl OrderStatistics {
    /// Counts orders per state.
    pub fn from_orders(orders: &[WorkOrder]) -> Self {
        let count = |state| orders.iter().filter(|o| o.state == state).count();
        Self {
            total: orders.len(),
            progress: count(OrderState::Progress),
            done: count(OrderState::Done),
            cancel: count(OrderState::Cancel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Many2One;

    fn order(id: i64, state: OrderState, subscription: &str, kind: &str) -> WorkOrder {
        WorkOrder {
            id,
            name: format!("OT-{id}"),
            state,
            type_id: Some(Many2One(1, kind.to_string())),
            subscription_id: Some(Many2One(id, subscription.to_string())),
        }
    }

    fn sample() -> Vec<WorkOrder> {
        vec![
            order(1, OrderState::Progress, "SUB/Luis Pérez", "Instalación"),
            order(2, OrderState::Done, "SUB/Maria Gómez", "Reparación"),
            order(3, OrderState::Cancel, "SUB/Luis Pérez", "Reparación"),
            WorkOrder {
                id: 4,
                name: "OT-4".to_string(),
                state: OrderState::Progress,
                type_id: None,
                subscription_id: None,
            },
        ]
    }

    #[test]
    fn test_search_fields() {
        assert_eq!(search(&sample(), "perez").len(), 2);
        assert_eq!(search(&sample(), "REPARACION").len(), 2);
        assert_eq!(search(&sample(), "ot-4").len(), 1);
        assert_eq!(search(&sample(), "").len(), 4);
    }

    #[test]
    fn test_filters_compose() {
        let filters = OrderFilters {
            state: Some(OrderState::Progress),
            search: Some("luis".to_string()),
        };
        let result = filters.apply(&sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_statistics() {
        let stats = OrderStatistics::from_orders(&sample());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.progress, 2);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.cancel, 1);
    }
}
