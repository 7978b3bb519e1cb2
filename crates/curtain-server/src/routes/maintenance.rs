//! Maintenance status routes: `/maintenance/status`, `/maintenance/toggle`,
//! `/maintenance/current-ip`.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use curtain_core::model::StatusRecord;

use crate::client_ip::ClientIp;
use crate::error::AppError;
use crate::state::AppState;

/// Build the status router (nested under `/maintenance`).
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(get_status))
        .route("/toggle", post(toggle))
        .route("/current-ip", get(current_ip))
}

/// Response body for `GET /maintenance/current-ip`.
#[derive(Debug, Serialize)]
pub struct CurrentIpResponse {
    /// The caller address as the whitelist check sees it.
    pub ip: Option<String>,
}

/// Read the maintenance flag.
async fn get_status(State(state): State<Arc<AppState>>) -> Result<Json<StatusRecord>, AppError> {
    Ok(Json(state.store.get_status().await?))
}

/// Flip the maintenance flag and return the new value.
async fn toggle(State(state): State<Arc<AppState>>) -> Result<Json<StatusRecord>, AppError> {
    Ok(Json(state.store.toggle_status().await?))
}

/// Report the caller's address, resolved with the same policy as the
/// overlay script uses.
async fn current_ip(ClientIp(ip): ClientIp) -> Json<CurrentIpResponse> {
    Json(CurrentIpResponse { ip })
}
