//! API Routes
//!
//! Configures the Axum router with all details service endpoints.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{
    details_handler, details_root_handler, metrics_handler, status_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /details/*isbn` - Book details, cached for the configured TTL
/// - `GET /details/` - Always 400, the ISBN is empty
/// - `GET /status` - Liveness check
/// - `GET /metrics` - Prometheus metrics
///
/// # Middleware
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/details/", get(details_root_handler))
        .route("/details/*isbn", get(details_handler))
        .route("/status", get(status_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
