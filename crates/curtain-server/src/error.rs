//! HTTP error types for the Curtain server.
//!
//! Maps store errors from `curtain-core` into HTTP responses. Every error
//! produces a JSON body with a machine-readable `error` field and a
//! human-readable `message`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use curtain_core::error::StoreError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Client sent invalid input.
    BadRequest(String),
    /// The resource already exists.
    Conflict(String),
    /// A persisted document failed schema validation.
    StorageCorrupt(String),
    /// Internal server error.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            Self::StorageCorrupt(msg) => {
                error!(error = %msg, "refusing to serve corrupt document");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_corrupt", msg)
            }
            Self::Internal(msg) => {
                error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidInput { .. } => Self::BadRequest(err.to_string()),
            StoreError::Conflict { .. } => Self::Conflict(err.to_string()),
            StoreError::Corrupt { .. } => Self::StorageCorrupt(err.to_string()),
            StoreError::MissingDocument { .. }
            | StoreError::Serialization { .. }
            | StoreError::Storage(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
