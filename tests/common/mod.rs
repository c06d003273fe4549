//! Shared helpers for the LinksProbe integration tests.
//!
//! Spins up a stub threat API on an ephemeral port and builds the relay router
//! pointed at it, so tests can drive `/scan` in-process.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use linksprobe::{app::AppState, config::Config, routes};
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

pub const FRONTEND_ORIGIN: &str = "https://linksprobe.example";
pub const API_KEY: &str = "test-key";
pub const LOOKUP_PATH: &str = "/v4/lookup";

/// One recorded call made against the stub.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub query: HashMap<String, String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// Handle to a running stub server.
pub struct StubUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

#[allow(dead_code)]
impl StubUpstream {
    pub fn lookup_url(&self) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, LOOKUP_PATH)).unwrap()
    }

    pub fn root_url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).unwrap()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn lookup(
    State(stub): State<StubState>,
    Query(query): Query<HashMap<String, String>>,
    body: axum::body::Bytes,
) -> Response {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    let body_json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    stub.calls.lock().unwrap().push(RecordedCall { query, body: body_json });
    if !stub.delay.is_zero() {
        tokio::time::sleep(stub.delay).await;
    }
    (stub.status, [(header::CONTENT_TYPE, "application/json")], stub.body.clone()).into_response()
}

async fn ping(State(stub): State<StubState>) -> Response {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    (stub.status, stub.body.clone()).into_response()
}

/// Yields to the runtime until the stub has served `expected` calls.
///
/// Only yields, never sleeps, so a paused clock is not advanced while waiting.
/// Gives up after five seconds of real time.
#[allow(dead_code)]
pub async fn wait_for_hits(stub: &StubUpstream, expected: usize) {
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while stub.hits() < expected {
        assert!(
            std::time::Instant::now() < deadline,
            "expected {expected} calls, got {}",
            stub.hits()
        );
        tokio::task::yield_now().await;
    }
}

/// Lets in-flight I/O settle without moving a paused clock.
#[allow(dead_code)]
pub async fn settle() {
    for _ in 0..200 {
        tokio::task::yield_now().await;
    }
}

/// Starts a stub that answers every lookup (and every `GET /`) with `status` and `body`.
#[allow(dead_code)]
pub async fn spawn_stub(status: StatusCode, body: &str) -> StubUpstream {
    spawn_stub_with_delay(status, body, Duration::ZERO).await
}

#[allow(dead_code)]
pub async fn spawn_stub_with_delay(status: StatusCode, body: &str, delay: Duration) -> StubUpstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        body: body.to_string(),
        delay,
        hits: hits.clone(),
        calls: calls.clone(),
    };

    let app = Router::new()
        .route(LOOKUP_PATH, post(lookup))
        .route("/", get(ping))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubUpstream { addr, hits, calls }
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}{}", addr, LOOKUP_PATH)).unwrap()
}

#[allow(dead_code)]
pub fn test_config(endpoint: &Url, timeout_secs: u64) -> Config {
    let endpoint = endpoint.to_string();
    let timeout = timeout_secs.to_string();
    Config::from_lookup(|name| match name {
        "FRONTEND_ORIGIN" => Some(FRONTEND_ORIGIN.to_string()),
        "GSB_API_KEY" => Some(API_KEY.to_string()),
        "GSB_ENDPOINT" => Some(endpoint.clone()),
        "UPSTREAM_TIMEOUT_SECS" => Some(timeout.clone()),
        _ => None,
    })
    .unwrap()
}

/// Router wired to the given threat-API endpoint.
#[allow(dead_code)]
pub fn relay(endpoint: &Url) -> Router {
    routes::router(AppState::new(test_config(endpoint, 5)).unwrap())
}

#[allow(dead_code)]
pub fn relay_with_timeout(endpoint: &Url, timeout_secs: u64) -> Router {
    routes::router(AppState::new(test_config(endpoint, timeout_secs)).unwrap())
}

/// Sends `POST /scan` with a raw body and returns the status and decoded JSON.
#[allow(dead_code)]
pub async fn post_scan(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/scan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
