//! Application state.

use std::fmt;
use std::sync::Arc;

use tracing::{error, warn};
use univid_client::{Analyzer, MetadataSource};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::services::{GeminiClient, GeminiResult, MockMetadataProvider};

/// Message returned while no classifier key is configured.
pub const AI_NOT_CONFIGURED: &str = "AI Service is not configured on the server.";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    /// `None` when no API key was provided at startup
    pub classifier: Option<Arc<GeminiClient>>,
    pub metadata: Arc<dyn MetadataSource>,
}

impl AppState {
    /// Create new application state.
    ///
    /// A missing API key is not fatal: the server still starts and the
    /// classification endpoints answer 503.
    pub fn new(config: ApiConfig) -> GeminiResult<Self> {
        let classifier = match config.gemini.api_key {
            Some(_) => Some(Arc::new(GeminiClient::new(&config.gemini)?)),
            None => {
                warn!("API_KEY environment variable not set. AI features will be disabled.");
                None
            }
        };

        Ok(Self {
            config,
            classifier,
            metadata: Arc::new(MockMetadataProvider::new()),
        })
    }

    /// Replace the video details provider.
    pub fn with_metadata(mut self, metadata: Arc<dyn MetadataSource>) -> Self {
        self.metadata = metadata;
        self
    }

    /// The classifier, or a 503 when it is not configured.
    pub fn require_classifier(&self) -> ApiResult<Arc<GeminiClient>> {
        self.classifier
            .clone()
            .ok_or_else(|| ApiError::service_unavailable(AI_NOT_CONFIGURED))
    }

    /// Log an internal failure and build the error returned to the caller.
    ///
    /// Details are withheld in production.
    pub fn internal_error(&self, cause: impl fmt::Display) -> ApiError {
        error!("Internal error: {}", cause);
        if self.config.is_production() {
            ApiError::InternalRedacted
        } else {
            ApiError::internal(cause.to_string())
        }
    }

    /// Two-step analyzer over the configured classifier and metadata source.
    pub fn analyzer(&self) -> ApiResult<Analyzer<Arc<GeminiClient>, Arc<dyn MetadataSource>>> {
        Ok(Analyzer::new(
            self.require_classifier()?,
            Arc::clone(&self.metadata),
        ))
    }
}
