//! Retry behaviour over a scripted transport, on tokio's paused clock.

use async_trait::async_trait;
use fieldguide_fetch::{
    FetchError, RawRequest, RawResponse, RetryPolicy, Transport, fetch_with_retry, send_with_retry,
};
use reqwest::Method;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Plays back canned outcomes and records when each attempt happened.
#[derive(Debug)]
struct ScriptedTransport {
    script: Mutex<VecDeque<Result<RawResponse, FetchError>>>,
    attempts: Mutex<Vec<Instant>>,
}

impl ScriptedTransport {
    fn new(script: Vec<Result<RawResponse, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            attempts: Mutex::new(Vec::new()),
        }
    }

    fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    /// Gaps between consecutive attempts.
    fn waits(&self) -> Vec<Duration> {
        let attempts = self.attempts.lock().unwrap();
        attempts.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, _request: &RawRequest) -> Result<RawResponse, FetchError> {
        self.attempts.lock().unwrap().push(Instant::now());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("script exhausted".to_string())))
    }
}

fn request() -> RawRequest {
    RawRequest::new(Method::POST, "http://odoo.test/rpc", Duration::from_secs(30))
}

fn ok(body: &str) -> Result<RawResponse, FetchError> {
    Ok(RawResponse::new(200, body))
}

fn status(code: u16) -> Result<RawResponse, FetchError> {
    Ok(RawResponse::new(code, ""))
}

fn timeout() -> Result<RawResponse, FetchError> {
    Err(FetchError::Timeout(Duration::from_secs(30)))
}

#[tokio::test(start_paused = true)]
async fn test_forbidden_is_attempted_once() {
    let transport = ScriptedTransport::new(vec![status(403), ok("true")]);
    let policy = RetryPolicy::new(3, Duration::from_millis(1000));

    let err = send_with_retry::<bool>(&transport, &request(), &policy)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "HTTP Error: 403");
    assert_eq!(transport.attempt_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unauthorized_and_not_found_are_final() {
    for code in [401, 404] {
        let transport = ScriptedTransport::new(vec![status(code), ok("true")]);
        let policy = RetryPolicy::new(3, Duration::from_millis(1000));

        let err = send_with_retry::<bool>(&transport, &request(), &policy)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(code));
        assert_eq!(transport.attempt_count(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn test_server_errors_then_success_use_linear_backoff() {
    let transport = ScriptedTransport::new(vec![
        status(500),
        status(500),
        status(500),
        ok(r#"{"uid": 7}"#),
    ]);
    let policy = RetryPolicy::new(3, Duration::from_millis(1000));

    let value: serde_json::Value = send_with_retry(&transport, &request(), &policy)
        .await
        .unwrap();

    assert_eq!(value["uid"], 7);
    assert_eq!(transport.attempt_count(), 4);
    assert_eq!(
        transport.waits(),
        vec![
            Duration::from_millis(1000),
            Duration::from_millis(2000),
            Duration::from_millis(3000)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_timeouts_stop_after_max_attempts() {
    let transport = ScriptedTransport::new(vec![timeout(), timeout(), timeout(), timeout(), ok("1")]);
    let policy = RetryPolicy::new(3, Duration::from_millis(1000));

    let err = send_with_retry::<i64>(&transport, &request(), &policy)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout(_)));
    assert_eq!(transport.attempt_count(), 4);
    assert_eq!(
        transport.waits(),
        vec![
            Duration::from_millis(1000),
            Duration::from_millis(2000),
            Duration::from_millis(3000)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_returns_last_error() {
    let transport = ScriptedTransport::new(vec![
        timeout(),
        Err(FetchError::Network("connection refused".to_string())),
        Ok(RawResponse::new(502, r#"{"message": "Bad gateway"}"#)),
    ]);
    let policy = RetryPolicy::new(2, Duration::from_millis(10));

    let err = send_with_retry::<bool>(&transport, &request(), &policy)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FetchError::HttpStatus {
            status: 502,
            message: "Bad gateway".to_string()
        }
    );
    assert_eq!(transport.attempt_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_no_retry_policy_makes_one_attempt() {
    let transport = ScriptedTransport::new(vec![status(500), ok("true")]);

    let err = send_with_retry::<bool>(&transport, &request(), &RetryPolicy::no_retry())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(transport.attempt_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_fetch_keeps_headers() {
    let mut response = RawResponse::new(200, r#"{"result": {"uid": 7}}"#);
    response.headers.insert(
        "set-cookie",
        reqwest::header::HeaderValue::from_static("session_id=abc; Path=/"),
    );
    let transport = ScriptedTransport::new(vec![Ok(response)]);

    let parsed = fetch_with_retry::<serde_json::Value>(&transport, &request(), &RetryPolicy::default())
        .await
        .unwrap();

    assert_eq!(parsed.status.as_u16(), 200);
    assert_eq!(parsed.headers["set-cookie"], "session_id=abc; Path=/");
    assert_eq!(parsed.body["result"]["uid"], 7);
}
