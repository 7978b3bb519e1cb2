//! Shared application state for the Curtain server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`.

use std::sync::Arc;

use curtain_core::script::OverlayText;
use curtain_core::store::MaintenanceStore;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Status and whitelist store.
    pub store: Arc<MaintenanceStore>,
    /// Whether forwarding headers may override the peer address.
    pub trust_proxy_headers: bool,
    /// Text rendered on the maintenance overlay.
    pub overlay: OverlayText,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .finish_non_exhaustive()
    }
}
