//! Collaborator seams the analyzer is generic over.

use std::sync::Arc;

use async_trait::async_trait;
use univid_models::{PlatformJudgment, VideoRecord};

use crate::error::ClientResult;

/// Decides which video platform a URL belongs to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformClassifier: Send + Sync {
    async fn classify(&self, url: &str) -> ClientResult<PlatformJudgment>;
}

/// Supplies display metadata for a URL.
///
/// The `platform` field of the returned record is informational only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_details(&self, url: &str) -> ClientResult<VideoRecord>;
}

#[async_trait]
impl<T: PlatformClassifier + ?Sized> PlatformClassifier for Arc<T> {
    async fn classify(&self, url: &str) -> ClientResult<PlatformJudgment> {
        (**self).classify(url).await
    }
}

#[async_trait]
impl<T: MetadataSource + ?Sized> MetadataSource for Arc<T> {
    async fn fetch_details(&self, url: &str) -> ClientResult<VideoRecord> {
        (**self).fetch_details(url).await
    }
}
