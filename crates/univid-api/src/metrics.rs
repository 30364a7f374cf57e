//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering.
///
/// Fails if a global recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "univid_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "univid_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "univid_http_requests_in_flight";

    // Classification metrics
    pub const CLASSIFICATIONS_TOTAL: &str = "univid_classifications_total";
    pub const CLASSIFICATION_DURATION_SECONDS: &str = "univid_classification_duration_seconds";
    pub const CLASSIFICATION_FAILURES_TOTAL: &str = "univid_classification_failures_total";

    // Analysis metrics
    pub const ANALYSES_TOTAL: &str = "univid_analyses_total";
}

/// Routes reported under their own label; everything else is `other`.
const KNOWN_PATHS: &[&str] = &[
    "/",
    "/health",
    "/healthz",
    "/ready",
    "/metrics",
    "/api/analyze-platform",
    "/api/video-details",
    "/api/analyze",
];

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path).to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a classifier verdict.
pub fn record_classification(platform: &str, is_valid: bool, duration_secs: f64) {
    let labels = [
        ("platform", platform.to_string()),
        ("valid", is_valid.to_string()),
    ];
    counter!(names::CLASSIFICATIONS_TOTAL, &labels).increment(1);
    histogram!(names::CLASSIFICATION_DURATION_SECONDS).record(duration_secs);
}

/// Record a failed classifier call.
pub fn record_classification_failure() {
    counter!(names::CLASSIFICATION_FAILURES_TOTAL).increment(1);
}

/// Record a finished two-step analysis.
pub fn record_analysis(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::ANALYSES_TOTAL, &labels).increment(1);
}

/// Map a request path to a bounded label set.
///
/// Static asset paths would otherwise create one series per file.
fn sanitize_path(path: &str) -> &str {
    let trimmed = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };

    KNOWN_PATHS
        .iter()
        .find(|known| **known == trimmed)
        .copied()
        .unwrap_or("other")
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("/api/analyze-platform"), "/api/analyze-platform");
        assert_eq!(sanitize_path("/api/video-details/"), "/api/video-details");
        assert_eq!(sanitize_path("/"), "/");
        assert_eq!(sanitize_path("/assets/index-4f2a.js"), "other");
    }
}
