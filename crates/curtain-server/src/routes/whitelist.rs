//! Whitelist routes: `/maintenance/whitelist`, `/maintenance/whitelist/{ip}`.
//!
//! List, add, and remove IP addresses that bypass the maintenance overlay.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use curtain_core::model::WhitelistEntry;

use crate::error::AppError;
use crate::state::AppState;

/// Build the whitelist router (nested under `/maintenance`).
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/whitelist", get(list_whitelist).post(add_to_whitelist))
        .route("/whitelist/{ip}", delete(remove_from_whitelist))
}

// ── Request / Response types ─────────────────────────────────────────

/// Request body for `POST /maintenance/whitelist`.
///
/// `ip` is optional at the schema level so that `{}` reaches validation and
/// is reported as a missing field rather than a parse failure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddWhitelistRequest {
    pub ip: Option<String>,
}

/// Response body for `DELETE /maintenance/whitelist/{ip}`.
#[derive(Debug, Serialize)]
pub struct RemoveWhitelistResponse {
    pub message: String,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// List all whitelisted addresses in insertion order.
async fn list_whitelist(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WhitelistEntry>>, AppError> {
    Ok(Json(state.store.list_whitelist().await?))
}

/// Add an address to the whitelist.
async fn add_to_whitelist(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddWhitelistRequest>, JsonRejection>,
) -> Result<Json<WhitelistEntry>, AppError> {
    let Json(body) = body?;
    let ip = body.ip.unwrap_or_default();

    let entry = state.store.add_to_whitelist(&ip).await?;
    Ok(Json(entry))
}

/// Remove an address. Succeeds whether or not it was present.
async fn remove_from_whitelist(
    State(state): State<Arc<AppState>>,
    Path(ip): Path<String>,
) -> Result<Json<RemoveWhitelistResponse>, AppError> {
    state.store.remove_from_whitelist(&ip).await?;

    Ok(Json(RemoveWhitelistResponse {
        message: format!("IP '{ip}' removed from whitelist"),
    }))
}
