//! API routes.

use std::path::Path;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::handlers::{analyze, analyze_platform, health, liveness, ready, video_details};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
///
/// When the configured static directory exists it is served with an
/// `index.html` fallback for client-side routes, which includes `/`.
/// Otherwise `/` answers with a plain liveness banner.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let api_routes = Router::new()
        .route("/analyze-platform", post(analyze_platform))
        .route("/video-details", post(video_details))
        .route("/analyze", post(analyze))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes);

    match state.config.static_dir.as_deref().filter(|dir| dir.is_dir()) {
        Some(dir) => {
            info!("Serving static files from {:?}", dir);
            app = app.fallback_service(spa_service(dir));
        }
        None => {
            app = app.route("/", get(liveness));
        }
    }

    app.layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

/// Static files with `index.html` served for any path that is not a file.
fn spa_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(dir.join("index.html")))
}
