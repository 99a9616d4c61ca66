//! In-process stand-in for the recruiting backend, used by tests.
//!
//! Binds an axum router on `127.0.0.1:0`, answers each path with a canned
//! `(status, json)` pair and records every request it receives.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    Json, Router,
};
use serde_json::{json, Value};

use crate::backend::{BackendClient, MODEL_VERSION_HEADER};

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub model_version: Option<String>,
    pub content_type: Option<String>,
    /// Parsed JSON body, `Value::Null` for non-JSON bodies.
    pub body: Value,
    pub raw: Bytes,
}

#[derive(Default)]
struct StubInner {
    responses: HashMap<String, (u16, Value)>,
    seen: Vec<SeenRequest>,
}

#[derive(Clone)]
pub struct StubBackend {
    addr: SocketAddr,
    inner: Arc<Mutex<StubInner>>,
}

impl StubBackend {
    pub async fn start() -> Self {
        let inner = Arc::new(Mutex::new(StubInner::default()));
        let app = Router::new().fallback(record).with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, inner }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> BackendClient {
        BackendClient::new(self.url()).unwrap()
    }

    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.inner
            .lock()
            .unwrap()
            .responses
            .insert(path.to_string(), (status, body));
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.inner.lock().unwrap().seen.clone()
    }
}

async fn record(
    State(inner): State<Arc<Mutex<StubInner>>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let seen = SeenRequest {
        path: uri.path().to_string(),
        model_version: header_text(MODEL_VERSION_HEADER),
        content_type: header_text(header::CONTENT_TYPE.as_str()),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        raw: body,
    };

    let mut guard = inner.lock().unwrap();
    let (status, reply) = guard
        .responses
        .get(uri.path())
        .cloned()
        .unwrap_or((404, json!({"message": "no stub for path"})));
    guard.seen.push(seen);

    (StatusCode::from_u16(status).unwrap(), Json(reply))
}
