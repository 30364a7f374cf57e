//! Video details provider.
//!
//! No scraping backend exists yet; every URL gets the same canned record.
//! The returned `platform` is a placeholder that callers replace with the
//! classifier's verdict.

use async_trait::async_trait;
use tracing::debug;
use univid_client::{ClientResult, MetadataSource};
use univid_models::{Platform, VideoRecord, DOWNLOAD_PLACEHOLDER};

const MOCK_TITLE: &str = "Video Title (from Unified Server)";
const MOCK_DESCRIPTION: &str =
    "This metadata was fetched from the server. The full-stack app is working!";
const MOCK_THUMBNAIL: &str = "https://picsum.photos/seed/unified/560/315";
const MOCK_PLATFORM: &str = "Detected (Server)";

/// Returns fixed metadata for any URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockMetadataProvider;

impl MockMetadataProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self) -> VideoRecord {
        VideoRecord {
            title: MOCK_TITLE.to_string(),
            description: MOCK_DESCRIPTION.to_string(),
            thumbnail_url: MOCK_THUMBNAIL.to_string(),
            platform: Platform::from(MOCK_PLATFORM),
            is_valid: true,
            download_url: Some(DOWNLOAD_PLACEHOLDER.to_string()),
        }
    }
}

#[async_trait]
impl MetadataSource for MockMetadataProvider {
    async fn fetch_details(&self, url: &str) -> ClientResult<VideoRecord> {
        debug!(url = %url, "Serving mock video details");
        Ok(self.record())
    }
}
