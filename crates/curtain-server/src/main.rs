//! Curtain server entry point.
//!
//! Opens the storage backend, initializes the maintenance store, then serves
//! the Axum router with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use curtain_core::store::MaintenanceStore;
use curtain_storage::{DocumentBackend, FileBackend, MemoryBackend};

use curtain_server::config::{ServerConfig, StorageBackendType};
use curtain_server::routes;
use curtain_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(storage = ?config.storage_backend, "Curtain starting");

    let state = build_app_state(&config).await?;
    let app = routes::build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        trust_proxy_headers = config.trust_proxy_headers,
        "Curtain server listening"
    );

    // Peer addresses feed the last step of caller IP resolution.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    info!("Curtain server stopped");
    Ok(())
}

/// Open storage, create default documents, and assemble the shared state.
async fn build_app_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    let backend: Arc<dyn DocumentBackend> = match &config.storage_backend {
        StorageBackendType::Memory => {
            info!("using in-memory storage (data will not persist)");
            Arc::new(MemoryBackend::new())
        }
        StorageBackendType::File { dir } => {
            info!(dir = %dir.display(), "using file storage");
            Arc::new(FileBackend::open(dir).context("failed to open file storage")?)
        }
    };

    let store = Arc::new(MaintenanceStore::new(backend));
    store
        .initialize()
        .await
        .context("failed to initialize maintenance store")?;

    Ok(Arc::new(AppState {
        store,
        trust_proxy_headers: config.trust_proxy_headers,
        overlay: config.overlay.clone(),
    }))
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
