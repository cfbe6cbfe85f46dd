//! Upstream Catalog Client
//!
//! Looks books up by ISBN against the Google Books volumes API.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use tracing::debug;

use crate::error::Result;
use crate::metrics::Metrics;
use crate::models::{VolumeInfo, VolumesResponse};

/// Inbound headers propagated to the upstream request for tracing
pub const TRACING_HEADERS: [&str; 7] = [
    "x-request-id",
    "x-b3-traceid",
    "x-b3-spanid",
    "x-b3-parentspanid",
    "x-b3-sampled",
    "x-b3-flags",
    "x-ot-span-context",
];

/// Client for the upstream volumes endpoint.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    metrics: Arc<Metrics>,
}

impl CatalogClient {
    /// Creates a client for `base_url` whose requests give up after `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        metrics: Arc<Metrics>,
    ) -> std::result::Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            metrics,
        })
    }

    /// Returns the first volume matching `isbn`, or None when nothing matched.
    ///
    /// Tracing headers present in `inbound` are forwarded upstream.
    pub async fn lookup_isbn(&self, isbn: &str, inbound: &HeaderMap) -> Result<Option<VolumeInfo>> {
        let mut request = self
            .http
            .get(&self.base_url)
            .query(&[("q", format!("isbn:{}", isbn))]);

        for name in TRACING_HEADERS {
            if let Some(value) = inbound.get(name) {
                request = request.header(name, value.clone());
            }
        }

        let started = Instant::now();
        let response = request.send().await;
        let code = match &response {
            Ok(response) => response.status().as_u16().to_string(),
            Err(_) => "error".to_string(),
        };
        self.metrics
            .outgoing
            .with_label_values(&[code.as_str()])
            .observe(started.elapsed().as_secs_f64());

        let volumes: VolumesResponse = response?.error_for_status()?.json().await?;
        debug!(isbn, total_items = volumes.total_items, "Upstream lookup completed");

        Ok(volumes.items.into_iter().next().map(|volume| volume.volume_info))
    }
}
