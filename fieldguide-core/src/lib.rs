// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `FieldGuide` Core
//!
//! Core types, models, and helpers for the `FieldGuide` client.
//!
//! This crate provides the foundational abstractions used across all other
//! `FieldGuide` crates, including:
//!
//! - Domain models (users, work guides, work orders, warehouse stock)
//! - The uniform [`DomainResult`] returned by the service façade
//! - API configuration ([`ApiConfig`])
//! - Client-side filtering, search, sorting and statistics helpers
//! - Display formatters, input validators and date helpers
//!
//! ## Key Types
//!
//! ### Session
//! - [`User`] - Identity cached locally after login
//!
//! ### Work
//! - [`WorkGuide`] - A batch of orders assigned to a team on a date
//! - [`WorkOrder`] - Summary row of a single field-service task
//! - [`WorkOrderDetail`] - Full order record, including ISP configuration
//!
//! ### Warehouse
//! - [`WarehouseData`] - The technician's stock location
//! - [`StockItem`] - Quantity of one product, with serial numbers

pub mod config;
pub mod dates;
pub mod error;
pub mod format;
pub mod models;
pub mod query;
pub mod validate;

pub use config::ApiConfig;
pub use error::CoreError;

pub use models::{
    // Session
    User,
    // Results
    DomainResult,
    // Guides
    GuideState,
    Many2One,
    WorkGuide,
    // Orders
    IspInfo,
    Location,
    OrderState,
    Partner,
    WorkOrder,
    WorkOrderDetail,
    // Warehouse
    SerialNumber,
    StockItem,
    WarehouseData,
};
