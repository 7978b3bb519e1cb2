//! System routes: `/health`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Build the system router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the status document is readable, `degraded` otherwise.
    pub status: &'static str,
    /// Current maintenance flag, when readable.
    pub maintenance: Option<bool>,
}

/// Health check.
///
/// Returns 200 if the status document can be read, 503 otherwise.
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    match state.store.get_status().await {
        Ok(status) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                maintenance: Some(status.enabled),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    maintenance: None,
                }),
            )
        }
    }
}
