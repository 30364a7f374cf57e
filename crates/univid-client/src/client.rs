//! UniVideo API HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;
use univid_models::{AnalysisRequest, ErrorBody, PlatformJudgment, VideoRecord};

use crate::config::ApiClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::traits::{MetadataSource, PlatformClassifier};

const ANALYZE_PLATFORM_PATH: &str = "api/analyze-platform";
const VIDEO_DETAILS_PATH: &str = "api/video-details";

/// Client for the two UniVideo analysis endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Network)?;

        let mut base_url = Url::parse(&config.base_url)?;
        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Ask the server's classifier which platform `url` belongs to.
    pub async fn analyze_platform(&self, url: &str) -> ClientResult<PlatformJudgment> {
        self.post_url(ANALYZE_PLATFORM_PATH, url, "Platform analysis").await
    }

    /// Fetch display metadata for `url`.
    pub async fn video_details(&self, url: &str) -> ClientResult<VideoRecord> {
        self.post_url(VIDEO_DETAILS_PATH, url, "Fetching details").await
    }

    /// Check the liveness route.
    pub async fn health_check(&self) -> bool {
        match self.http.get(self.base_url.clone()).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!("API liveness check failed: {}", response.status());
                false
            }
            Err(e) => {
                warn!("API liveness check error: {}", e);
                false
            }
        }
    }

    async fn post_url<T: DeserializeOwned>(
        &self,
        path: &str,
        url: &str,
        operation: &str,
    ) -> ClientResult<T> {
        let request = AnalysisRequest::new(url);
        request.validate()?;

        let endpoint = self.base_url.join(path)?;
        debug!("POST {}", endpoint);

        let response = self.http.post(endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|b| b.error)
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| {
                    format!("{} failed with status: {}", operation, status.as_u16())
                });
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl PlatformClassifier for ApiClient {
    async fn classify(&self, url: &str) -> ClientResult<PlatformJudgment> {
        self.analyze_platform(url).await
    }
}

#[async_trait]
impl MetadataSource for ApiClient {
    async fn fetch_details(&self, url: &str) -> ClientResult<VideoRecord> {
        self.video_details(url).await
    }
}
