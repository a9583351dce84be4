#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use stacksearch::config::Config;
use stacksearch::dispatcher::SearchClient;

/// In-process stand-in for the search backend. Configure it, then `spawn` it.
pub struct MockBackend {
    pub health_status: StatusCode,
    pub search_status: StatusCode,
    /// JSON reply for `/search`. `None` echoes the query back as one result.
    pub search_reply: Option<Value>,
    /// Plain-text reply for `/search`, wins over `search_reply`.
    pub search_raw: Option<&'static str>,
    pub search_delay: Duration,
    pub delay_for: HashMap<String, Duration>,
    pub sync_status: StatusCode,
    pub sync_delay: Duration,

    pub health_hits: AtomicUsize,
    pub search_hits: AtomicUsize,
    pub sync_hits: AtomicUsize,
    pub search_bodies: Mutex<Vec<Value>>,
    pub search_content_types: Mutex<Vec<String>>,
    pub sync_params: Mutex<Vec<HashMap<String, String>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            health_status: StatusCode::OK,
            search_status: StatusCode::OK,
            search_reply: None,
            search_raw: None,
            search_delay: Duration::ZERO,
            delay_for: HashMap::new(),
            sync_status: StatusCode::OK,
            sync_delay: Duration::ZERO,
            health_hits: AtomicUsize::new(0),
            search_hits: AtomicUsize::new(0),
            sync_hits: AtomicUsize::new(0),
            search_bodies: Mutex::new(Vec::new()),
            search_content_types: Mutex::new(Vec::new()),
            sync_params: Mutex::new(Vec::new()),
        }
    }
}

impl MockBackend {
    pub fn hits(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    /// Binds to an ephemeral port and returns the base URL.
    pub async fn spawn(self) -> (String, Arc<MockBackend>) {
        let mock = Arc::new(self);
        let app = Router::new()
            .route("/health", get(health))
            .route("/search", post(search))
            .route("/sync", post(sync))
            .with_state(mock.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), mock)
    }
}

async fn health(State(mock): State<Arc<MockBackend>>) -> Response {
    mock.health_hits.fetch_add(1, Ordering::SeqCst);
    let body = json!({
        "status": "healthy",
        "service": "contentstack-semantic-search",
        "version": "1.0.0"
    });
    (mock.health_status, Json(body)).into_response()
}

async fn search(
    State(mock): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.search_hits.fetch_add(1, Ordering::SeqCst);
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    mock.search_content_types.lock().unwrap().push(content_type);

    let query = body["query"].as_str().unwrap_or_default().to_string();
    mock.search_bodies.lock().unwrap().push(body);

    let delay = mock.delay_for.get(&query).copied().unwrap_or(mock.search_delay);
    tokio::time::sleep(delay).await;

    if let Some(raw) = mock.search_raw {
        return (mock.search_status, raw).into_response();
    }
    let reply = mock
        .search_reply
        .clone()
        .unwrap_or_else(|| json!({"results": [{"product_id": query, "score": 0.5}]}));
    (mock.search_status, Json(reply)).into_response()
}

async fn sync(
    State(mock): State<Arc<MockBackend>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.sync_hits.fetch_add(1, Ordering::SeqCst);
    let content_type = params.get("content_type").cloned().unwrap_or_default();
    mock.sync_params.lock().unwrap().push(params);
    tokio::time::sleep(mock.sync_delay).await;

    if mock.sync_status.is_success() {
        let body = json!({"status": "sync_completed", "content_type": content_type});
        (mock.sync_status, Json(body)).into_response()
    } else {
        let body = json!({"error": "Contentstack fetcher not available"});
        (mock.sync_status, Json(body)).into_response()
    }
}

pub fn client_for(base_url: &str) -> SearchClient {
    SearchClient::new(&Config::with_base_url(base_url))
}

pub fn client_with_timeout(base_url: &str, search_timeout: Duration) -> SearchClient {
    let mut config = Config::with_base_url(base_url);
    config.search_timeout = search_timeout;
    SearchClient::new(&config)
}

/// Nothing listens here; connections are refused immediately.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";
