use axum::{response::Json, http::StatusCode};
use serde_json::{json, Value};

/// GET /health - liveness probe, no envelope.
pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
