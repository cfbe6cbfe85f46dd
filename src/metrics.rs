//! Service Metrics
//!
//! Request latency histograms, the in-flight gauge and the cache size gauge,
//! held in a dedicated Prometheus registry.

use std::fmt;

use prometheus::{HistogramOpts, HistogramVec, IntGauge, Registry, TextEncoder};

/// Upper bounds (seconds) of the latency histogram buckets
pub const DURATION_BUCKETS: [f64; 6] = [0.1, 0.5, 1.0, 1.5, 2.0, 5.0];

/// Status codes of the details endpoint exported before any request is seen
const INCOMING_CODES: [&str; 5] = ["200", "400", "404", "500", "503"];

// == Metrics ==
/// All metrics exported by the service.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    /// Latency of requests served by the details endpoint, by status code
    pub incoming: HistogramVec,
    /// Latency of requests sent to the upstream catalog, by status code
    pub outgoing: HistogramVec,
    in_flight: IntGauge,
    cache_size: IntGauge,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let incoming = HistogramVec::new(
            HistogramOpts::new(
                "details_incoming_requests_duration_seconds",
                "Histogram of incoming request latencies.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["code"],
        )?;
        let outgoing = HistogramVec::new(
            HistogramOpts::new(
                "details_outgoing_requests_duration_seconds",
                "Histogram of request latencies to the downstream API.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["code"],
        )?;
        let in_flight = IntGauge::new(
            "details_incoming_requests_in_flight",
            "Number of in-flight requests to the details service.",
        )?;
        let cache_size = IntGauge::new(
            "details_cache_size",
            "Number of items in the in-memory cache",
        )?;

        registry.register(Box::new(incoming.clone()))?;
        registry.register(Box::new(outgoing.clone()))?;
        registry.register(Box::new(in_flight.clone()))?;
        registry.register(Box::new(cache_size.clone()))?;

        for code in INCOMING_CODES {
            incoming.with_label_values(&[code]);
        }

        Ok(Self {
            registry,
            incoming,
            outgoing,
            in_flight,
            cache_size,
        })
    }

    /// Counts a request as in flight until the returned guard is dropped.
    pub fn track_in_flight(&self) -> InFlightGuard {
        self.in_flight.inc();
        InFlightGuard {
            in_flight: self.in_flight.clone(),
        }
    }

    pub fn in_flight(&self) -> i64 {
        self.in_flight.get()
    }

    /// Renders every metric in the text exposition format.
    ///
    /// `cache_size` is sampled by the caller at scrape time.
    pub fn render(&self, cache_size: usize) -> prometheus::Result<String> {
        self.cache_size.set(i64::try_from(cache_size).unwrap_or(i64::MAX));

        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}

impl fmt::Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metrics")
            .field("in_flight", &self.in_flight.get())
            .field("cache_size", &self.cache_size.get())
            .finish_non_exhaustive()
    }
}

/// Decrements the in-flight gauge on drop.
pub struct InFlightGuard {
    in_flight: IntGauge,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.dec();
    }
}
