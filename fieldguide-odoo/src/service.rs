//! The work-guide service façade.

use fieldguide_core::validate::is_required;
use fieldguide_core::{ApiConfig, DomainResult, User, WarehouseData, WorkGuide, WorkOrder, WorkOrderDetail};
use fieldguide_fetch::header::{HeaderMap, SET_COOKIE};
use fieldguide_fetch::rpc::{CallKwParams, LoginParams, RpcRequest, RpcResponse};
use fieldguide_fetch::{FetchError, HttpClient};
use fieldguide_store::SessionStore;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{debug, error, info, instrument, warn};

use crate::endpoints::{AUTHENTICATE, CHECK, DESTROY, ServiceMethod, WORK_GUIDE_SERVICE};
use crate::error::OdooError;

/// Cookie issued by Odoo for the web session.
const SESSION_COOKIE_NAME: &str = "session_id=";

// ============================================================================
// Service
// ============================================================================

/// Typed operations against the work-guide service.
///
/// Every operation returns a [`DomainResult`]; no error escapes.
#[derive(Debug, Clone)]
pub struct OdooService {
    config: ApiConfig,
    client: HttpClient,
    session: SessionStore,
}

impl OdooService {
    /// Creates a service over a real HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`OdooError::Fetch`] if the HTTP client cannot be built from
    /// `config`.
    pub fn new(config: ApiConfig, session: SessionStore) -> Result<Self, OdooError> {
        let client = HttpClient::new(&config)?;
        Ok(Self::with_client(config, client, session))
    }

    /// Creates a service over an existing client.
    pub fn with_client(config: ApiConfig, client: HttpClient, session: SessionStore) -> Self {
        Self {
            config,
            client,
            session,
        }
    }

    /// Connection settings in use.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Session store in use.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Authenticates and stores the session.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<User> {
        let result = self.try_login(email.trim(), password).await;
        if let Ok(user) = &result {
            info!(uid = user.uid, "Logged in");
        }
        finish("login", result)
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<User, OdooError> {
        if !is_required(email) || !is_required(password) {
            return Err(OdooError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }

        let body = RpcRequest::call(LoginParams {
            db: self.config.db_name.clone(),
            login: email.to_string(),
            password: password.to_string(),
        });
        let parsed = self
            .client
            .post_with_headers::<RpcResponse<Value>, _>(AUTHENTICATE, &body, HeaderMap::new())
            .await?;

        let result = match parsed.body.into_result() {
            Ok(Some(result)) => result,
            Ok(None) => return Err(OdooError::InvalidCredentials),
            Err(e) => {
                debug!(error = %e, "Authentication refused");
                return Err(OdooError::InvalidCredentials);
            }
        };
        let uid = result.get("uid").and_then(Value::as_i64).unwrap_or(0);
        if uid == 0 {
            return Err(OdooError::InvalidCredentials);
        }

        let user: User =
            serde_json::from_value(result).map_err(|e| OdooError::Malformed(e.to_string()))?;
        let cookie = session_cookie_from(&parsed.headers);
        if cookie.is_none() {
            warn!("Login response carried no session cookie");
        }

        self.session.save_login(&user, cookie.as_deref()).await?;
        Ok(user)
    }

    /// Ends the session.
    ///
    /// The server is told to destroy the session once, without retries; the
    /// local session is cleared whether or not that call succeeds.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> DomainResult<()> {
        let cookie = self.session.session_cookie().await.unwrap_or_else(|e| {
            warn!(error = %e, "Could not read session cookie");
            None
        });

        if cookie.is_some() {
            let headers = self.session.attach_session_header(HeaderMap::new()).await;
            let body = RpcRequest::call(json!({}));
            if let Err(e) = self
                .client
                .post_once::<Value, _>(DESTROY, &body, headers)
                .await
            {
                warn!(error = %e, "Server-side logout failed");
            }
        }

        match self.session.clear().await {
            Ok(()) => {
                info!("Logged out");
                DomainResult::done()
            }
            Err(e) => {
                error!(operation = "logout", error = %e, "Operation failed");
                DomainResult::failure("Could not log out")
            }
        }
    }

    /// Returns true while a user is cached locally.
    pub async fn check_session(&self) -> bool {
        self.session.has_session().await
    }

    /// Asks the server whether the stored session is still valid.
    ///
    /// An RPC error from the check route means the session expired.
    #[instrument(skip(self))]
    pub async fn verify_session(&self) -> DomainResult<bool> {
        if !self.check_session().await {
            return DomainResult::ok(false);
        }

        let headers = self.session.attach_session_header(HeaderMap::new()).await;
        let body = RpcRequest::call(json!({}));
        let result = match self
            .client
            .post::<RpcResponse<Value>, _>(CHECK, &body, headers)
            .await
            .and_then(RpcResponse::into_result)
        {
            Ok(_) => Ok(true),
            Err(FetchError::Rpc { code, message }) => {
                debug!(code, message = %message, "Session rejected by server");
                Ok(false)
            }
            Err(e) => Err(OdooError::from(e)),
        };
        finish("verify_session", result)
    }

    /// The cached user, if a session is active.
    pub async fn get_user_data(&self) -> Option<User> {
        self.session.user().await.unwrap_or_else(|e| {
            warn!(error = %e, "Could not read cached user");
            None
        })
    }

    /// The cached user id, if a session is active.
    pub async fn get_current_user_id(&self) -> Option<i64> {
        match self.session.user_id().await {
            Ok(uid) => uid.filter(|&uid| uid != 0),
            Err(e) => {
                warn!(error = %e, "Could not read user id");
                None
            }
        }
    }

    // ========================================================================
    // Work Guides
    // ========================================================================

    /// Every guide assigned to the current user.
    #[instrument(skip(self))]
    pub async fn get_all_guides(&self) -> DomainResult<Vec<WorkGuide>> {
        self.call(ServiceMethod::GetAllGuides, Vec::new()).await
    }

    /// One guide by id.
    #[instrument(skip(self))]
    pub async fn get_guide(&self, guide_id: i64) -> DomainResult<WorkGuide> {
        self.call(ServiceMethod::GetGuide, vec![guide_id.into()]).await
    }

    // ========================================================================
    // Work Orders
    // ========================================================================

    /// Orders belonging to a guide.
    #[instrument(skip(self))]
    pub async fn get_orders_by_guide(&self, guide_id: i64) -> DomainResult<Vec<WorkOrder>> {
        self.call(ServiceMethod::GetOrdersByGuide, vec![guide_id.into()])
            .await
    }

    /// Full order record.
    #[instrument(skip(self))]
    pub async fn get_order_detail(&self, order_id: i64) -> DomainResult<WorkOrderDetail> {
        self.call(ServiceMethod::GetOrder, vec![order_id.into()]).await
    }

    /// Writes `patch` onto an order.
    ///
    /// A `false` result from the server is a failure.
    #[instrument(skip(self, patch), fields(fields = patch.len()))]
    pub async fn update_order(&self, order_id: i64, patch: &Map<String, Value>) -> DomainResult<()> {
        let args = vec![order_id.into(), Value::Object(patch.clone())];
        let result: DomainResult<bool> = self.call(ServiceMethod::UpdateOrder, args).await;
        match result.into_result() {
            Ok(_) => DomainResult::done(),
            Err(message) => DomainResult::failure(message),
        }
    }

    // ========================================================================
    // Warehouse
    // ========================================================================

    /// The current user's stock location.
    #[instrument(skip(self))]
    pub async fn get_warehouse(&self) -> DomainResult<WarehouseData> {
        self.call(ServiceMethod::GetDetailedStore, Vec::new()).await
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    async fn call<T: DeserializeOwned>(&self, method: ServiceMethod, args: Vec<Value>) -> DomainResult<T> {
        finish(method.as_str(), self.try_call(method, args).await)
    }

    async fn try_call<T: DeserializeOwned>(
        &self,
        method: ServiceMethod,
        args: Vec<Value>,
    ) -> Result<T, OdooError> {
        let uid = self
            .get_current_user_id()
            .await
            .ok_or(FetchError::NoActiveSession)?;

        let mut params = CallKwParams::new(WORK_GUIDE_SERVICE, method.as_str());
        params.args = args;
        let body = RpcRequest::call(params).with_id(uid);
        let headers = self.session.attach_session_header(HeaderMap::new()).await;

        let response: RpcResponse<Value> = self.client.post(&method.path(), &body, headers).await?;
        match response.into_result()? {
            Some(value) if is_truthy(&value) => {
                serde_json::from_value(value).map_err(|e| OdooError::Malformed(e.to_string()))
            }
            _ => Err(OdooError::Rejected(method.failure_message())),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Logs a failure and folds the outcome into a [`DomainResult`].
fn finish<T>(operation: &str, result: Result<T, OdooError>) -> DomainResult<T> {
    match result {
        Ok(data) => DomainResult::ok(data),
        Err(e) => {
            error!(operation, error = %e, "Operation failed");
            DomainResult::failure(e.to_string())
        }
    }
}

/// Odoo signals "nothing" with `null`, `false`, `0` or an empty string.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Picks the session cookie out of the `set-cookie` headers.
///
/// Falls back to the first cookie when none is named `session_id`.
fn session_cookie_from(headers: &HeaderMap) -> Option<String> {
    let cookies: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    cookies
        .iter()
        .find(|c| c.trim_start().starts_with(SESSION_COOKIE_NAME))
        .or_else(|| cookies.first())
        .map(|c| c.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldguide_fetch::header::HeaderValue;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({"id": 1})));
    }

    #[test]
    fn test_session_cookie_preferred() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("frontend_lang=es_EC; Path=/"));
        headers.append(SET_COOKIE, HeaderValue::from_static("session_id=abc; HttpOnly; Path=/"));

        assert_eq!(
            session_cookie_from(&headers).as_deref(),
            Some("session_id=abc; HttpOnly; Path=/")
        );
    }

    #[test]
    fn test_first_cookie_fallback() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_cookie_from(&headers), None);

        headers.append(SET_COOKIE, HeaderValue::from_static("sid=xyz"));
        assert_eq!(session_cookie_from(&headers).as_deref(), Some("sid=xyz"));
    }

    #[test]
    fn test_finish_keeps_message() {
        let result: DomainResult<()> = finish("get_order", Err(FetchError::NoActiveSession.into()));
        assert_eq!(result.error(), Some("No active session"));
        assert!(!result.is_success());
    }
}
