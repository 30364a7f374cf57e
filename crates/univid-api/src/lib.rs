//! Axum HTTP API server for UniVideo.
//!
//! This crate provides:
//! - The platform classifier endpoint backed by Gemini
//! - The video details endpoint and a combined analyze endpoint
//! - Static front-end serving with client-side routing fallback
//! - Security headers, request IDs and Prometheus metrics

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod security;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::{GeminiClient, GeminiConfig, MockMetadataProvider};
pub use state::AppState;
