//! HTTP server initialization and runtime setup.
//!
//! Handles the database connection, schema bootstrap, garbage collector
//! lifecycle, and the Axum server.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::garbage_collector::GarbageCollector;
use crate::infrastructure::persistence;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Database connection pool for the configured backend
/// - `links` table (created if missing)
/// - Background garbage collector
/// - Axum HTTP server
///
/// On Ctrl+C or SIGTERM the server stops accepting requests, drains in-flight
/// ones, then signals the collector and waits for it to exit.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or schema creation fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let link_settings = config.link_settings()?;

    let repository = persistence::connect(&config).await?;
    tracing::info!(backend = %config.database_kind, "Connected to database");

    repository
        .ensure_schema()
        .await
        .context("Failed to create links table")?;
    tracing::info!("Schema ready");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let collector =
        GarbageCollector::new(repository.clone(), config.gc_interval()).spawn(shutdown_rx);

    let link_service = Arc::new(LinkService::new(repository, link_settings));
    let state = AppState::new(link_service);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = collector.await {
        tracing::error!("Garbage collector task failed: {}", e);
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received, stopping server...");
}
