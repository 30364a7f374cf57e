//! Two-step analysis: classify the platform, then fetch metadata.
//!
//! The classifier gates the metadata call. An unrecognized URL never
//! reaches the metadata source, and the classifier's platform always
//! replaces whatever the metadata source guessed.

use std::fmt;

use tracing::{info, warn};
use univid_models::{AnalysisRequest, PlatformJudgment, VideoRecord};

use crate::error::ClientResult;
use crate::traits::{MetadataSource, PlatformClassifier};

/// What the analyzer does when a collaborator fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Substitute placeholder records so callers always get something renderable
    #[default]
    Fallback,
    /// Propagate collaborator errors to the caller
    Strict,
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fallback => write!(f, "fallback"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Sequences a [`PlatformClassifier`] and a [`MetadataSource`].
///
/// Stateless between calls: the same responses always produce the same record.
pub struct Analyzer<C, M> {
    classifier: C,
    metadata: M,
    mode: FailureMode,
}

impl<C, M> Analyzer<C, M>
where
    C: PlatformClassifier,
    M: MetadataSource,
{
    /// Create an analyzer in [`FailureMode::Fallback`].
    pub fn new(classifier: C, metadata: M) -> Self {
        Self {
            classifier,
            metadata,
            mode: FailureMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: FailureMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> FailureMode {
        self.mode
    }

    /// Analyze one URL.
    ///
    /// A blank URL is rejected before any collaborator is called. Otherwise
    /// errors are only returned in [`FailureMode::Strict`].
    pub async fn analyze(&self, url: &str) -> ClientResult<VideoRecord> {
        AnalysisRequest::new(url).validate()?;

        let judgment = match self.classifier.classify(url).await {
            Ok(judgment) => judgment,
            Err(e) if self.mode == FailureMode::Fallback => {
                warn!("Platform classification failed, treating as unknown: {}", e);
                PlatformJudgment::unknown()
            }
            Err(e) => return Err(e),
        };

        if !judgment.is_recognized() {
            info!(
                platform = %judgment.platform,
                is_valid = judgment.is_valid,
                "URL not recognized, skipping metadata fetch"
            );
            return Ok(VideoRecord::invalid());
        }

        match self.metadata.fetch_details(url).await {
            Ok(details) => {
                info!(platform = %judgment.platform, "Fetched video details");
                Ok(details.merged_with(&judgment))
            }
            Err(e) if self.mode == FailureMode::Fallback => {
                warn!("Metadata fetch failed, using placeholder details: {}", e);
                Ok(VideoRecord::metadata_fallback(judgment.platform))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::traits::{MockMetadataSource, MockPlatformClassifier};
    use mockall::predicate::eq;
    use univid_models::{ModelError, Platform};

    const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    fn classifier_returning(platform: &'static str, is_valid: bool) -> MockPlatformClassifier {
        let mut classifier = MockPlatformClassifier::new();
        classifier
            .expect_classify()
            .returning(move |_| Ok(PlatformJudgment::new(platform, is_valid)));
        classifier
    }

    fn failing_classifier() -> MockPlatformClassifier {
        let mut classifier = MockPlatformClassifier::new();
        classifier
            .expect_classify()
            .times(1)
            .returning(|_| Err(ClientError::service("classifier offline")));
        classifier
    }

    fn metadata_returning_tdu() -> MockMetadataSource {
        let mut metadata = MockMetadataSource::new();
        metadata.expect_fetch_details().returning(|_| {
            Ok(serde_json::from_value(serde_json::json!({
                "title": "T",
                "description": "D",
                "thumbnailUrl": "U",
                "platform": "ignored",
                "isValid": true
            }))
            .unwrap())
        });
        metadata
    }

    fn metadata_never_called() -> MockMetadataSource {
        let mut metadata = MockMetadataSource::new();
        metadata.expect_fetch_details().times(0);
        metadata
    }

    fn failing_metadata() -> MockMetadataSource {
        let mut metadata = MockMetadataSource::new();
        metadata.expect_fetch_details().times(1).returning(|_| {
            Err(ClientError::Status {
                status: 500,
                message: "boom".to_string(),
            })
        });
        metadata
    }

    #[tokio::test]
    async fn test_merge_uses_classifier_platform() {
        let mut classifier = MockPlatformClassifier::new();
        classifier
            .expect_classify()
            .with(eq(VIDEO_URL))
            .times(1)
            .returning(|_| Ok(PlatformJudgment::new(Platform::YouTube, true)));
        let mut metadata = MockMetadataSource::new();
        metadata
            .expect_fetch_details()
            .with(eq(VIDEO_URL))
            .times(1)
            .returning(|_| {
                Ok(VideoRecord {
                    title: "T".to_string(),
                    description: "D".to_string(),
                    thumbnail_url: "U".to_string(),
                    platform: Platform::from("ignored"),
                    is_valid: true,
                    download_url: None,
                })
            });

        let record = Analyzer::new(classifier, metadata)
            .analyze(VIDEO_URL)
            .await
            .unwrap();

        assert_eq!(
            record,
            VideoRecord {
                title: "T".to_string(),
                description: "D".to_string(),
                thumbnail_url: "U".to_string(),
                platform: Platform::YouTube,
                is_valid: true,
                download_url: None,
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_platform_short_circuits() {
        let analyzer = Analyzer::new(classifier_returning("Unknown", false), metadata_never_called());

        let record = analyzer.analyze("https://example.com/page").await.unwrap();
        assert_eq!(record, VideoRecord::invalid());
    }

    #[tokio::test]
    async fn test_invalid_judgment_short_circuits_even_with_platform() {
        let analyzer = Analyzer::new(classifier_returning("YouTube", false), metadata_never_called());

        let record = analyzer.analyze(VIDEO_URL).await.unwrap();
        assert_eq!(record, VideoRecord::invalid());
    }

    #[tokio::test]
    async fn test_unknown_platform_marked_valid_still_short_circuits() {
        let analyzer = Analyzer::new(classifier_returning("Unknown", true), metadata_never_called());

        let record = analyzer.analyze(VIDEO_URL).await.unwrap();
        assert!(!record.is_valid);
    }

    #[tokio::test]
    async fn test_classifier_failure_falls_back_to_invalid() {
        let analyzer = Analyzer::new(failing_classifier(), metadata_never_called());

        let record = analyzer.analyze(VIDEO_URL).await.unwrap();
        assert_eq!(record, VideoRecord::invalid());
    }

    #[tokio::test]
    async fn test_classifier_failure_propagates_in_strict_mode() {
        let analyzer = Analyzer::new(failing_classifier(), metadata_never_called())
            .with_mode(FailureMode::Strict);

        let err = analyzer.analyze(VIDEO_URL).await.unwrap_err();
        assert!(matches!(err, ClientError::Service(_)));
    }

    #[tokio::test]
    async fn test_metadata_failure_falls_back_with_known_platform() {
        let analyzer = Analyzer::new(classifier_returning("TikTok", true), failing_metadata());

        let record = analyzer
            .analyze("https://www.tiktok.com/@user/video/123")
            .await
            .unwrap();
        assert_eq!(record, VideoRecord::metadata_fallback(Platform::TikTok));
        assert!(record.is_valid);
    }

    #[tokio::test]
    async fn test_metadata_failure_propagates_in_strict_mode() {
        let analyzer = Analyzer::new(classifier_returning("Vimeo", true), failing_metadata())
            .with_mode(FailureMode::Strict);

        let err = analyzer.analyze("https://vimeo.com/1").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_blank_url_calls_nothing() {
        let mut classifier = MockPlatformClassifier::new();
        classifier.expect_classify().times(0);
        let analyzer = Analyzer::new(classifier, metadata_never_called());

        let err = analyzer.analyze("  ").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ModelError::EmptyUrl)));
    }

    #[tokio::test]
    async fn test_repeated_analysis_is_identical() {
        let analyzer = Analyzer::new(classifier_returning("Instagram", true), metadata_returning_tdu());

        let first = analyzer.analyze(VIDEO_URL).await.unwrap();
        let second = analyzer.analyze(VIDEO_URL).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.platform, Platform::Instagram);
    }

    #[test]
    fn test_default_mode_is_fallback() {
        let analyzer = Analyzer::new(MockPlatformClassifier::new(), MockMetadataSource::new());
        assert_eq!(analyzer.mode(), FailureMode::Fallback);
    }
}
