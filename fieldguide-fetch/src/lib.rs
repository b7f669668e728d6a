// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `FieldGuide` Fetch
//!
//! Network plumbing for talking to an Odoo server over JSON-RPC.
//!
//! Layers, leaves first:
//!
//! - [`transport`] - One request with a bounded wait ([`Transport`], [`HttpTransport`])
//! - [`retry`] - Linear-backoff retries over a transport ([`RetryPolicy`], [`send_with_retry`])
//! - [`rpc`] - JSON-RPC 2.0 envelopes as Odoo expects them
//! - [`client`] - Base URL, default headers and retry bundled together ([`HttpClient`])
//!
//! ## Example
//!
//! ```ignore
//! use fieldguide_core::ApiConfig;
//! use fieldguide_fetch::{HttpClient, rpc::{CallKwParams, RpcRequest, RpcResponse}};
//!
//! let client = HttpClient::new(&ApiConfig::new("https://erp.example.com"))?;
//! let body = RpcRequest::call(CallKwParams::new("res.partner", "search_count")).with_id(7);
//! let response: RpcResponse<i64> = client
//!     .post("/web/dataset/call_kw/res.partner/search_count", &body, HeaderMap::new())
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod retry;
pub mod rpc;
pub mod transport;

pub use reqwest::header;

pub use client::HttpClient;
pub use error::FetchError;
pub use retry::{Parsed, RetryPolicy, fetch_with_retry, send_with_retry};
pub use transport::{HttpTransport, RawRequest, RawResponse, Transport};
