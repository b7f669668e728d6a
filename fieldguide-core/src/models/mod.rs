//! Domain models for `FieldGuide`.
//!
//! These types mirror the payloads returned by the work-guide service on
//! the Odoo server. They are passed through unmodified; decoding is lenient
//! about Odoo's habit of sending `false` for empty fields.
//!
//! ## Submodules
//!
//! - [`user`] - Cached identity of the logged-in technician
//! - [`guide`] - Work guides
//! - [`order`] - Work orders and their detail records
//! - [`warehouse`] - Stock held by the technician
//! - [`result`] - The uniform façade result

mod guide;
mod odoo;
mod order;
mod result;
mod user;
mod warehouse;

pub use guide::{GuideState, Many2One, WorkGuide};
pub use order::{
    EndDate, IspInfo, IspStatus, Location, NamedValue, OrderState, Partner, TimeSpent, WorkOrder,
    WorkOrderDetail,
};
pub use result::DomainResult;
pub use user::User;
pub use warehouse::{SerialNumber, StockItem, WarehouseData};
