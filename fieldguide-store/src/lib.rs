// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `FieldGuide` Store
//!
//! Local state for the `FieldGuide` client.
//!
//! This crate provides:
//!
//! - **`SessionStore`**: Session cookie, cached user and user id
//! - **`KeyValueStore`**: Memory and JSON-file backends for the session
//! - **Config**: `ApiConfig` loading from file and environment
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use fieldguide_store::{FileStore, SessionStore, default_session_path, load_config};
//! use std::sync::Arc;
//!
//! let config = load_config().await?;
//! let session = SessionStore::new(Arc::new(FileStore::open(default_session_path()).await));
//!
//! if session.has_session().await {
//!     let headers = session.attach_session_header(HeaderMap::new()).await;
//! }
//! ```

pub mod config;
pub mod error;
pub mod kv;
pub mod persistence;
pub mod session;

pub use config::{apply_env_overrides, init_config, load_config, load_config_with, save_config};
pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use persistence::{
    default_config_dir, default_config_path, default_session_path, ensure_dir, load_json,
    load_json_or_default, save_json,
};
pub use session::SessionStore;
