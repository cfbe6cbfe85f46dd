//! Error types for the details service
//!
//! Provides unified error handling using thiserror. The cache itself cannot
//! fail; these errors cover request parsing and the upstream lookup.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

use crate::models::ErrorResponse;

// == Details Error Enum ==
/// Unified error type for the details service.
#[derive(Error, Debug)]
pub enum DetailsError {
    /// Path segment is not an integer identifier
    #[error("invalid ISBN {0:?}")]
    InvalidId(String),

    /// Upstream catalog returned no match
    #[error("ISBN {0} not found")]
    NotFound(String),

    /// Upstream catalog did not answer within the configured timeout
    #[error("upstream request timed out: {0}")]
    UpstreamTimeout(String),

    /// Upstream catalog failed or returned an unusable response
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// Error injected on purpose
    #[error("random error")]
    Injected,
}

impl DetailsError {
    /// HTTP status code reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DetailsError::InvalidId(_) => StatusCode::BAD_REQUEST,
            DetailsError::NotFound(_) => StatusCode::NOT_FOUND,
            DetailsError::UpstreamTimeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            DetailsError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DetailsError::Injected => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<reqwest::Error> for DetailsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DetailsError::UpstreamTimeout(err.to_string())
        } else {
            DetailsError::Upstream(err.to_string())
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for DetailsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!("/details/ error: {}", self);

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the details service.
pub type Result<T> = std::result::Result<T, DetailsError>;
