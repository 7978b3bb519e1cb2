//! HTTP route handlers for Curtain.
//!
//! Routes are organized by concern:
//! - `maintenance`: status flag (read, toggle) and caller IP
//! - `whitelist`: whitelist CRUD
//! - `script`: the conditional overlay script
//! - `sys`: health check
//! - `ui`: admin page

pub mod maintenance;
pub mod script;
pub mod sys;
pub mod ui;
pub mod whitelist;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router with middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(maintenance::router())
        .merge(whitelist::router())
        .merge(script::router());

    // The overlay script is embedded by arbitrary sites and the admin page
    // may be hosted elsewhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/maintenance", api)
        .merge(sys::router())
        .merge(ui::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}
