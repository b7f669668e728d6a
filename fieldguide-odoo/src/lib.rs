// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `FieldGuide` Odoo
//!
//! Typed access to the `ek.contract.work.guide.service` model.
//!
//! [`OdooService`] wraps each model method in a JSON-RPC envelope, sends it
//! with the session cookie under the configured retry policy, and folds the
//! outcome into a [`fieldguide_core::DomainResult`].
//!
//! ## Usage
//!
//! ```ignore
//! use fieldguide_core::ApiConfig;
//! use fieldguide_odoo::OdooService;
//! use fieldguide_store::SessionStore;
//!
//! let service = OdooService::new(ApiConfig::new("https://erp.example.com"), SessionStore::in_memory())?;
//! let login = service.login("tech@example.com", "secret").await;
//! if login.is_success() {
//!     let guides = service.get_all_guides().await;
//! }
//! ```

pub mod endpoints;
pub mod error;
pub mod service;

pub use endpoints::ServiceMethod;
pub use error::OdooError;
pub use service::OdooService;
