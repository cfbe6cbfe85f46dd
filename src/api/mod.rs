//! API Module
//!
//! HTTP handlers and routing for the details service.
//!
//! # Endpoints
//! - `GET /details/:isbn` - Book details by ISBN
//! - `GET /status` - Liveness check
//! - `GET /metrics` - Prometheus metrics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
