//! Book Details - lookup service for book details
//!
//! Serves book details from the Google Books catalog behind an in-memory
//! TTL cache.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_details::api::create_router;
use book_details::cache::ResponseCache;
use book_details::models::BookDetails;
use book_details::{AppState, Config};

/// Main entry point for the details service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Select the cache implementation and build the upstream client
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on the configured address
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_details=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting book details service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: upstream={}, timeout={:?}, delay={:?}, cache_expiry={:?}, error_ratio={}",
        config.upstream_url,
        config.upstream_timeout,
        config.response_delay,
        config.cache_expiry,
        config.error_ratio
    );

    let state = AppState::from_config(&config).context("failed to build application state")?;
    let cache = state.cache.clone();

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_address.as_str())
        .await
        .with_context(|| format!("failed to bind {}", config.listen_address))?;
    info!("Listening on {}", config.listen_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cache))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, stops the cache's background sweep.
async fn shutdown_signal(cache: Arc<dyn ResponseCache<BookDetails>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
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

    cache.shutdown();
    warn!("Cache sweep stopped");
}
