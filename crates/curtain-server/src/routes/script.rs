//! Overlay script route: `/maintenance/maintenance-script`.
//!
//! Sites embed this as `<script src=".../maintenance/maintenance-script">`.
//! The response is always 200 with a JavaScript content type; whether the
//! visitor is blocked is encoded only in the body (overlay script or empty),
//! so the tag itself never produces a visible error.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use tracing::{debug, warn};

use curtain_core::script::render_overlay;

use crate::client_ip::ClientIp;
use crate::state::AppState;

/// Content type of the script response.
pub const JAVASCRIPT: &str = "application/javascript";

/// Build the script router (nested under `/maintenance`).
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/maintenance-script", get(maintenance_script))
}

/// Serve the overlay script if maintenance is on and the caller is not
/// whitelisted, otherwise an empty script.
///
/// Store failures are logged and answered with an empty script (fail open).
async fn maintenance_script(
    State(state): State<Arc<AppState>>,
    ClientIp(ip): ClientIp,
) -> impl IntoResponse {
    let block = match state.store.should_block(ip.as_deref()).await {
        Ok(block) => block,
        Err(e) => {
            warn!(error = %e, "maintenance check failed, serving empty script");
            false
        }
    };

    debug!(ip = ?ip, block, "maintenance script requested");

    let body = if block {
        render_overlay(&state.overlay)
    } else {
        String::new()
    };

    ([(header::CONTENT_TYPE, JAVASCRIPT)], body)
}
