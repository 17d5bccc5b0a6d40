//! Fake TOM backend served by axum on an ephemeral port.

use asteroid_tracker::config::resolve_value;
use asteroid_tracker::domain::Configuration;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TARGET_PK: u64 = 5;

/// A request received by the observe endpoint
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Received {
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct BackendState {
    status: Arc<(StatusCode, String)>,
    observe: Arc<(StatusCode, String)>,
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<Received>>>,
}

pub struct Backend {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<Received>>>,
}

#[allow(dead_code)]
impl Backend {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    /// Settings document as the host page would embed it
    pub fn settings(&self) -> Value {
        json!({
            "base_url": format!("{}/", self.base_url),
            "api_url": format!("/api/target/{}/", TARGET_PK),
            "observe_api_url": "/api/observe/",
            "target_pk": TARGET_PK,
            "template_name": "asteroid",
            "facility": "LCO"
        })
    }

    pub fn config(&self) -> Arc<Configuration> {
        Arc::new(resolve_value(&self.settings()).expect("fixture settings should resolve"))
    }
}

async fn status_handler(State(state): State<BackendState>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let (status, body) = (*state.status).clone();
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

async fn observe_handler(
    State(state): State<BackendState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_str(&body).unwrap_or(Value::Null);
    state
        .received
        .lock()
        .unwrap()
        .push(Received { content_type, body });
    let (status, body) = (*state.observe).clone();
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// Start a backend answering the status and observe endpoints with fixed
/// responses.
pub async fn spawn_backend(status: (u16, String), observe: (u16, String)) -> Backend {
    let state = BackendState {
        status: Arc::new((StatusCode::from_u16(status.0).unwrap(), status.1)),
        observe: Arc::new((StatusCode::from_u16(observe.0).unwrap(), observe.1)),
        hits: Arc::new(AtomicUsize::new(0)),
        received: Arc::new(Mutex::new(Vec::new())),
    };
    let backend = Backend {
        base_url: String::new(),
        hits: state.hits.clone(),
        received: state.received.clone(),
    };

    let app = Router::new()
        .route(&format!("/api/target/{}/", TARGET_PK), get(status_handler))
        .route("/api/observe/", post(observe_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Backend {
        base_url: format!("http://{}", addr),
        ..backend
    }
}

/// Base URL nothing is listening on
#[allow(dead_code)]
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[allow(dead_code)]
pub fn status_document(timelapses: Value) -> String {
    json!({
        "target": {
            "name": "433 Eros",
            "identifier": "eros",
            "extra_fields": {"description_markdown": "First NEO **discovered**."}
        },
        "timelapses": timelapses
    })
    .to_string()
}
