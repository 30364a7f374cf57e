//! Client configuration.

use std::time::Duration;

/// Local address used when the API is not deployed separately.
pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the UniVideo API
    pub base_url: String,
    /// Transport timeout per request
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("UNIVID_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout: parse_timeout(std::env::var("UNIVID_API_TIMEOUT").ok().as_deref()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Seconds from the environment; missing, malformed or zero values use the default.
fn parse_timeout(value: Option<&str>) -> Duration {
    let secs = value
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}
