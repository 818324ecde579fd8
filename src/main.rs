//! Orders Service - order records behind a cache-aside TTL cache

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};

use orders_service::{api::create_router, logging, spawn_cleanup_task, AppState, Config};

/// Main entry point for the orders service.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize console and rolling file logging
/// 3. Open the order store and create the cache
/// 4. Start background cache cleanup task
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Flushes the log file when main returns
    let _log_guard = logging::init(config.log_dir.as_deref()).context("failed to open log file")?;

    info!("Starting orders service");
    info!(
        port = config.server_port,
        cache_max_entries = config.cache_max_entries,
        cache_ttl_secs = config.cache_ttl,
        cleanup_interval_secs = config.cleanup_interval,
        data_file = ?config.data_file,
        log_dir = ?config.log_dir,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config)
        .await
        .context("failed to open order store")?;

    let cleanup_handle = spawn_cleanup_task(state.cache.clone(), config.cleanup_interval);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the cleanup task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
