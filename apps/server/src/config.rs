//! Server configuration.

use std::time::Duration;

/// Runtime configuration assembled from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Delay between polling cycles.
    pub poll_interval: Duration,
    /// Delay between currency rate refreshes.
    pub rate_interval: Duration,
    /// Per-request timeout for all outbound HTTP.
    pub http_timeout: Duration,
    /// Whether to run the reference exchange websocket feed.
    pub push_feed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            poll_interval: Duration::from_secs(5),
            rate_interval: Duration::from_secs(60 * 60),
            http_timeout: Duration::from_secs(10),
            push_feed: true,
        }
    }
}
