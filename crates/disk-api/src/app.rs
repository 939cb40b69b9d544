//! Server runner: binds the listener and serves the router until shutdown.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use disk_core::config::AppConfig;
use disk_core::error::AppError;
use disk_database::store::UnitStore;

use crate::router::build_router;
use crate::state::AppState;

/// Serve the HTTP API over `store` until Ctrl+C or SIGTERM.
///
/// In-flight requests get `server.shutdown_grace_seconds` to finish after
/// the signal; connections still open after that are dropped.
pub async fn run_server(config: AppConfig, store: Arc<dyn UnitStore>) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let backend = store.backend();
    let app = build_router(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, store = backend, "Disk server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();
    let deadline = async move {
        let _ = shutdown_rx.changed().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
            info!("Disk server shut down gracefully");
        }
        _ = deadline => {
            warn!(
                grace_seconds = grace.as_secs(),
                "Shutdown grace period elapsed, dropping open connections"
            );
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
