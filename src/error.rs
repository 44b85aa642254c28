// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::database::repository::RepositoryError;

/// HTTP API error with appropriate status codes and client-friendly messages.
/// Internal detail is logged where the error originates, never serialized here.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity (well-formed JSON, invalid field values)
    UnprocessableEntity { field_errors: HashMap<String, String> },

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error payload placed under the envelope's `error` key. Validation
    /// failures expose the field → message map directly; everything else is a
    /// single `message` entry.
    pub fn error_payload(&self) -> Value {
        match self {
            ApiError::UnprocessableEntity { field_errors } => json!(field_errors),
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalServerError(msg) => json!({ "message": msg }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unprocessable_entity(field_errors: HashMap<String, String>) -> Self {
        ApiError::UnprocessableEntity { field_errors }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    /// Map a gateway failure, keeping the `NotFound` sentinel and flattening
    /// everything else behind a caller-supplied generic message.
    pub fn from_repository(err: RepositoryError, generic_message: &str) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::not_found("todo list not found"),
            RepositoryError::Database(e) => {
                tracing::error!(error = %e, "database error");
                ApiError::internal_server_error(generic_message)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::UnprocessableEntity { field_errors } => {
                write!(f, "validation failed on {} field(s)", field_errors.len())
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalServerError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic conversion to the error envelope for axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = json!({
            "status": "error",
            "error": self.error_payload(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}
