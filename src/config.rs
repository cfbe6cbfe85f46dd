//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default Google Books volumes endpoint
pub const DEFAULT_UPSTREAM_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub listen_address: String,
    /// Volumes endpoint of the upstream catalog
    pub upstream_url: String,
    /// Maximum time to wait for the upstream catalog
    pub upstream_timeout: Duration,
    /// Artificial delay after receiving the upstream response
    pub response_delay: Duration,
    /// How long responses stay cached; zero disables caching
    pub cache_expiry: Duration,
    /// Ratio of requests answered with an injected error, within [0, 1]
    pub error_ratio: f64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LISTEN_ADDRESS` - Listen address (default: 0.0.0.0:8080)
    /// - `UPSTREAM_URL` - Upstream volumes endpoint (default: Google Books)
    /// - `UPSTREAM_TIMEOUT_MS` - Upstream timeout in milliseconds (default: 5000)
    /// - `RESPONSE_DELAY_MS` - Artificial delay in milliseconds (default: 0)
    /// - `CACHE_EXPIRY_MS` - Cache TTL in milliseconds, 0 disables (default: 0)
    /// - `ERROR_RATIO` - Injected error ratio, clamped to [0, 1] (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_address: env::var("LISTEN_ADDRESS").unwrap_or(defaults.listen_address),
            upstream_url: env::var("UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            upstream_timeout: env_millis("UPSTREAM_TIMEOUT_MS")
                .unwrap_or(defaults.upstream_timeout),
            response_delay: env_millis("RESPONSE_DELAY_MS").unwrap_or(defaults.response_delay),
            cache_expiry: env_millis("CACHE_EXPIRY_MS").unwrap_or(defaults.cache_expiry),
            error_ratio: env_parse::<f64>("ERROR_RATIO")
                .filter(|ratio| !ratio.is_nan())
                .map(|ratio| ratio.clamp(0.0, 1.0))
                .unwrap_or(defaults.error_ratio),
        }
    }

    /// Cache TTL, or None when caching is disabled.
    pub fn cache_ttl(&self) -> Option<Duration> {
        Some(self.cache_expiry).filter(|ttl| !ttl.is_zero())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:8080".to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout: Duration::from_secs(5),
            response_delay: Duration::ZERO,
            cache_expiry: Duration::ZERO,
            error_ratio: 0.0,
        }
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn env_millis(name: &str) -> Option<Duration> {
    env_parse::<u64>(name).map(Duration::from_millis)
}
