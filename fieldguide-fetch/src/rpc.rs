//! JSON-RPC 2.0 envelopes as used by Odoo's web controllers.
//!
//! # Protocol
//!
//! Every call is an HTTP POST whose body is
//!
//! ```json
//! {"jsonrpc": "2.0", "method": "call", "params": {...}, "id": 7}
//! ```
//!
//! and whose response carries exactly one of `result` or `error`.
//!
//! Model methods go through `/web/dataset/call_kw/<model>/<method>` with
//! [`CallKwParams`]; authentication goes through
//! `/web/session/authenticate` with [`LoginParams`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::FetchError;

/// JSON-RPC protocol version.
pub const JSONRPC_VERSION: &str = "2.0";

/// The only method Odoo's JSON routes accept.
pub const CALL_METHOD: &str = "call";

/// Builds the `call_kw` path for a model method.
pub fn call_kw_path(model: &str, method: &str) -> String {
    format!("/web/dataset/call_kw/{model}/{method}")
}

// ============================================================================
// Request Envelope
// ============================================================================

/// JSON-RPC request message.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<P> {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,
    /// Always `"call"`.
    pub method: &'static str,
    /// Method-specific payload.
    pub params: P,
    /// Optional request id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl<P: Serialize> RpcRequest<P> {
    /// Wraps `params` in a `call` envelope without an id.
    pub fn call(params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: CALL_METHOD,
            params,
            id: None,
        }
    }

    /// Sets the envelope id.
    ///
    /// The work-guide service expects the authenticated user id here.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Parameters of a `call_kw` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallKwParams {
    /// Model name, e.g. `res.partner`.
    pub model: String,
    /// Public model method.
    pub method: String,
    /// Positional arguments.
    pub args: Vec<Value>,
    /// Keyword arguments.
    pub kwargs: Map<String, Value>,
}

impl CallKwParams {
    /// Creates params with no arguments.
    pub fn new(model: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            method: method.into(),
            args: Vec::new(),
            kwargs: Map::new(),
        }
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Sets a keyword argument.
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    /// The endpoint path for these params.
    pub fn path(&self) -> String {
        call_kw_path(&self.model, &self.method)
    }
}

/// Parameters of `/web/session/authenticate`.
#[derive(Clone, Serialize)]
pub struct LoginParams {
    /// Database name.
    pub db: String,
    /// Login (e-mail).
    pub login: String,
    /// Password.
    pub password: String,
}

impl fmt::Debug for LoginParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginParams")
            .field("db", &self.db)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Response Envelope
// ============================================================================

/// JSON-RPC response message.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    /// Protocol version echoed by the server.
    #[serde(default)]
    pub jsonrpc: String,
    /// Echoed id (number or null).
    #[serde(default)]
    pub id: Option<Value>,
    /// Result on success.
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    /// Error on failure.
    #[serde(default)]
    pub error: Option<RpcErrorPayload>,
}

impl<T> RpcResponse<T> {
    /// Unwraps the envelope.
    ///
    /// `Ok(None)` means the server sent neither a result nor an error; the
    /// caller decides what that means for its operation.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Rpc`] when the envelope carries an error.
    pub fn into_result(self) -> Result<Option<T>, FetchError> {
        match self.error {
            Some(error) => Err(error.into()),
            None => Ok(self.result),
        }
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RpcErrorPayload {
    /// Error code (Odoo uses 200 for server exceptions, 100 for session expiry).
    #[serde(default)]
    pub code: i64,
    /// Generic message, e.g. "Odoo Server Error".
    #[serde(default)]
    pub message: String,
    /// Exception details.
    #[serde(default)]
    pub data: Option<RpcErrorData>,
}

/// Odoo exception details.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RpcErrorData {
    /// Exception class, e.g. `odoo.exceptions.AccessDenied`.
    #[serde(default)]
    pub name: String,
    /// Server traceback.
    #[serde(default)]
    pub debug: String,
    /// Exception message.
    #[serde(default)]
    pub message: String,
    /// Exception arguments.
    #[serde(default)]
    pub arguments: Vec<Value>,
    /// Request context.
    #[serde(default)]
    pub context: Map<String, Value>,
}

impl RpcErrorPayload {
    /// The most specific message available.
    pub fn best_message(&self) -> String {
        self.data
            .as_ref()
            .map(|d| d.message.trim())
            .filter(|m| !m.is_empty())
            .or_else(|| Some(self.message.trim()).filter(|m| !m.is_empty()))
            .map_or_else(|| format!("RPC error {}", self.code), str::to_string)
    }
}

impl From<RpcErrorPayload> for FetchError {
    fn from(payload: RpcErrorPayload) -> Self {
        FetchError::Rpc {
            code: payload.code,
            message: payload.best_message(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
