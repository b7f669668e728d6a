//! Odoo routes and the work-guide service methods.

use fieldguide_fetch::rpc::call_kw_path;

/// Logs in and issues the session cookie.
pub const AUTHENTICATE: &str = "/web/session/authenticate";

/// Invalidates the session server-side.
pub const DESTROY: &str = "/web/session/destroy";

/// Fails with an RPC error when the session is no longer valid.
pub const CHECK: &str = "/web/session/check";

/// Model exposing the technician's guides, orders and stock.
pub const WORK_GUIDE_SERVICE: &str = "ek.contract.work.guide.service";

/// Public methods of [`WORK_GUIDE_SERVICE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMethod {
    /// Every guide assigned to the user.
    GetAllGuides,
    /// One guide by id.
    GetGuide,
    /// Orders belonging to a guide.
    GetOrdersByGuide,
    /// Full order record.
    GetOrder,
    /// Writes a partial order record.
    UpdateOrder,
    /// The user's stock location with quantities and serials.
    GetDetailedStore,
}

impl ServiceMethod {
    /// Method name as exposed by the model.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetAllGuides => "get_all_guides",
            Self::GetGuide => "get_guide",
            Self::GetOrdersByGuide => "get_orders_by_guide",
            Self::GetOrder => "get_order",
            Self::UpdateOrder => "update_order",
            Self::GetDetailedStore => "get_detailed_store",
        }
    }

    /// `call_kw` path for this method.
    pub fn path(self) -> String {
        call_kw_path(WORK_GUIDE_SERVICE, self.as_str())
    }

    /// Message reported when the call yields no usable result.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::GetAllGuides => "Could not load the work guides",
            Self::GetGuide => "Could not load the work guide",
            Self::GetOrdersByGuide => "Could not load the orders",
            Self::GetOrder => "Could not load the order detail",
            Self::UpdateOrder => "Could not update the order",
            Self::GetDetailedStore => "Could not load the warehouse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(
            ServiceMethod::GetAllGuides.path(),
            "/web/dataset/call_kw/ek.contract.work.guide.service/get_all_guides"
        );
        assert_eq!(
            ServiceMethod::GetDetailedStore.path(),
            "/web/dataset/call_kw/ek.contract.work.guide.service/get_detailed_store"
        );
    }
}
