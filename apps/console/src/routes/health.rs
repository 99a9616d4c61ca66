use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::backend::MODEL_VERSION;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and the backend in use.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "recruiting-console",
        "backend": state.backend.base_url(),
        "model": MODEL_VERSION
    }))
}
