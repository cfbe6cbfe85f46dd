//! API Handlers
//!
//! HTTP request handlers for each details service endpoint.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use anyhow::Context;
use tracing::{debug, error};

use crate::cache::{build_cache, ResponseCache};
use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::error::{DetailsError, Result};
use crate::metrics::Metrics;
use crate::models::{BookDetails, StatusResponse};

/// ISBN of "The Comedy of Errors", served for the placeholder ISBN `0`
pub const PLACEHOLDER_ISBN: &str = "0486424618";

/// Application state shared across all handlers.
///
/// The cache is held as a trait object so handlers do not care whether
/// caching is enabled.
#[derive(Clone)]
pub struct AppState {
    /// Response cache, possibly the no-op variant
    pub cache: Arc<dyn ResponseCache<BookDetails>>,
    /// Upstream catalog client
    pub catalog: CatalogClient,
    /// Exported metrics
    pub metrics: Arc<Metrics>,
    /// Ratio of requests failed on purpose
    pub error_ratio: f64,
    /// Delay applied after an upstream lookup
    pub response_delay: Duration,
}

impl AppState {
    /// Creates a new AppState with error injection and delay disabled.
    pub fn new(
        cache: Arc<dyn ResponseCache<BookDetails>>,
        catalog: CatalogClient,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            cache,
            catalog,
            metrics,
            error_ratio: 0.0,
            response_delay: Duration::ZERO,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Selects the cache implementation from the configured expiry, so this
    /// must run inside a tokio runtime.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let metrics = Arc::new(Metrics::new().context("failed to register metrics")?);
        let catalog = CatalogClient::new(
            config.upstream_url.clone(),
            config.upstream_timeout,
            metrics.clone(),
        )
        .context("failed to build upstream client")?;
        let cache = build_cache(config.cache_ttl());

        Ok(Self::new(cache, catalog, metrics)
            .with_error_ratio(config.error_ratio)
            .with_response_delay(config.response_delay))
    }

    pub fn with_error_ratio(mut self, error_ratio: f64) -> Self {
        self.error_ratio = error_ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_response_delay(mut self, response_delay: Duration) -> Self {
        self.response_delay = response_delay;
        self
    }
}

/// Handler for GET /details/*isbn
///
/// The whole path remainder is taken as the ISBN, so `/details/a/b` is
/// answered with 400 like any other unparsable ISBN.
pub async fn details_handler(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    headers: HeaderMap,
) -> Response {
    serve_details(&state, isbn, &headers).await
}

/// Handler for GET /details/ (empty ISBN)
pub async fn details_root_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    serve_details(&state, String::new(), &headers).await
}

/// Serves from the cache when possible, otherwise looks the ISBN up
/// upstream and caches the result. Tracks the in-flight gauge and the
/// incoming latency histogram.
async fn serve_details(state: &AppState, isbn: String, headers: &HeaderMap) -> Response {
    let _in_flight = state.metrics.track_in_flight();
    let started = Instant::now();

    let response = lookup_details(state, isbn, headers).await.into_response();

    state
        .metrics
        .incoming
        .with_label_values(&[response.status().as_str()])
        .observe(started.elapsed().as_secs_f64());
    response
}

async fn lookup_details(
    state: &AppState,
    isbn: String,
    headers: &HeaderMap,
) -> Result<Json<BookDetails>> {
    if state.error_ratio > 0.0 && rand::random::<f64>() < state.error_ratio {
        return Err(DetailsError::Injected);
    }

    let isbn = if isbn == "0" {
        PLACEHOLDER_ISBN.to_string()
    } else {
        isbn
    };
    let id: i64 = isbn
        .parse()
        .map_err(|_| DetailsError::InvalidId(isbn.clone()))?;

    if let Some(details) = state.cache.get(id) {
        debug!(id, "Cache hit");
        return Ok(Json(details));
    }

    // The cache lock is not held here; concurrent misses each go upstream.
    let volume = state
        .catalog
        .lookup_isbn(&isbn, headers)
        .await?
        .ok_or_else(|| DetailsError::NotFound(isbn.clone()))?;

    let details = BookDetails::from_volume(id, &volume);
    state.cache.set(id, details.clone());

    if !state.response_delay.is_zero() {
        tokio::time::sleep(state.response_delay).await;
    }

    Ok(Json(details))
}

/// Handler for GET /status
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// Handler for GET /metrics
///
/// The cache size gauge is sampled on every scrape.
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render(state.cache.len()) {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => {
            error!("Failed to encode metrics: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStore, NoopCache};

    // Nothing listens on the discard port, so any upstream call fails fast.
    fn test_state(cache: Arc<dyn ResponseCache<BookDetails>>) -> AppState {
        let metrics = Arc::new(Metrics::new().unwrap());
        let catalog = CatalogClient::new(
            "http://127.0.0.1:9/books/v1/volumes",
            Duration::from_secs(1),
            metrics.clone(),
        )
        .unwrap();
        AppState::new(cache, catalog, metrics)
    }

    fn sample_details(id: i64) -> BookDetails {
        BookDetails {
            id,
            author: "William Shakespeare".to_string(),
            year: "2002".to_string(),
            kind: "paperback".to_string(),
            pages: 66,
            publisher: "Courier Corporation".to_string(),
            language: "English".to_string(),
            isbn_10: "0486424618".to_string(),
            isbn_13: "9780486424613".to_string(),
        }
    }

    #[tokio::test]
    async fn test_details_cache_hit() {
        let state = test_state(Arc::new(CacheStore::<BookDetails>::new(
            Duration::from_secs(60),
        )));
        state.cache.set(486424618, sample_details(486424618));

        let response = details_handler(
            State(state.clone()),
            Path("0486424618".to_string()),
            HeaderMap::new(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.metrics.incoming.with_label_values(&["200"]).get_sample_count(), 1);
        assert_eq!(state.metrics.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_details_placeholder_isbn_hits_cache() {
        let state = test_state(Arc::new(CacheStore::<BookDetails>::new(
            Duration::from_secs(60),
        )));
        state.cache.set(486424618, sample_details(486424618));

        let response =
            details_handler(State(state), Path("0".to_string()), HeaderMap::new()).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_details_invalid_isbn() {
        let state = test_state(Arc::new(NoopCache));

        let response = details_handler(
            State(state.clone()),
            Path("not-a-number".to_string()),
            HeaderMap::new(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.metrics.incoming.with_label_values(&["400"]).get_sample_count(), 1);
    }

    #[tokio::test]
    async fn test_details_empty_isbn() {
        let state = test_state(Arc::new(NoopCache));

        let response = details_root_handler(State(state.clone()), HeaderMap::new()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.metrics.incoming.with_label_values(&["400"]).get_sample_count(), 1);
    }

    #[tokio::test]
    async fn test_details_nested_path_is_invalid() {
        let state = test_state(Arc::new(NoopCache));

        let response =
            details_handler(State(state.clone()), Path("1/2".to_string()), HeaderMap::new()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.metrics.outgoing.with_label_values(&["error"]).get_sample_count(), 0);
    }

    #[tokio::test]
    async fn test_details_injected_error() {
        let state = test_state(Arc::new(NoopCache)).with_error_ratio(1.0);

        let response =
            details_handler(State(state), Path("1".to_string()), HeaderMap::new()).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_details_upstream_unreachable() {
        let state = test_state(Arc::new(NoopCache));

        let response =
            details_handler(State(state.clone()), Path("1".to_string()), HeaderMap::new()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(state.metrics.outgoing.with_label_values(&["error"]).get_sample_count(), 1);
    }

    #[tokio::test]
    async fn test_status_handler() {
        let response = status_handler().await;
        assert_eq!(response.message, "OK");
    }

    #[test]
    fn test_error_ratio_is_clamped() {
        let state = test_state(Arc::new(NoopCache)).with_error_ratio(7.0);
        assert_eq!(state.error_ratio, 1.0);
    }
}
