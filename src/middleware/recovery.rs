use std::any::Any;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde_json::json;
use tracing::error;

/// Panic handler for `tower_http`'s catch-panic layer: logs the fault and
/// answers with the generic internal-error envelope so the process keeps
/// serving subsequent requests.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<axum::body::Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(panic = %detail, "panic recovered");

    let body = json!({
        "status": "error",
        "error": { "message": "internal server error" },
    });

    let mut response = Response::new(axum::body::Body::from(body.to_string()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
