//! Routing client configuration.

use std::time::Duration;

/// Public OSRM demo server.
pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default maximum concurrent requests.
pub const DEFAULT_MAX_CONCURRENT: usize = 2;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Base URL of the OSRM-compatible service
    pub base_url: String,
    /// Routing profile segment of the request path
    pub profile: String,
    /// Maximum requests in flight at once
    pub max_concurrent: usize,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Pause between attempts
    pub retry_backoff: Duration,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: "foot".to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_millis(250),
            timeout_secs: 10,
        }
    }
}

impl RoutingConfig {
    /// Set a custom base URL (self-hosted OSRM, or a test server).
    ///
    /// A trailing slash is dropped so request paths join cleanly.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set the number of retries after the first attempt.
    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set the pause between attempts.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
