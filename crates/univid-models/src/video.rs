//! Video display record models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::platform::{Platform, PlatformJudgment};

/// Download URL sentinel meaning "no real link".
pub const DOWNLOAD_PLACEHOLDER: &str = "#";

const INVALID_TITLE: &str = "Invalid or Unknown URL";
const INVALID_DESCRIPTION: &str =
    "The provided URL could not be identified. Please check it and try again.";
const INVALID_THUMBNAIL: &str = "https://picsum.photos/seed/invalid/560/315";

const FALLBACK_TITLE: &str = "Example Video Title (Fallback)";
const FALLBACK_DESCRIPTION: &str =
    "Could not reach the metadata service. This is placeholder data.";
const FALLBACK_THUMBNAIL: &str = "https://picsum.photos/560/315";

/// Everything needed to render a result card for one analyzed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    /// Overwritten with the classifier's verdict after a metadata fetch
    pub platform: Platform,
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl VideoRecord {
    /// Placeholder returned when classification failed or was inconclusive.
    pub fn invalid() -> Self {
        Self {
            title: INVALID_TITLE.to_string(),
            description: INVALID_DESCRIPTION.to_string(),
            thumbnail_url: INVALID_THUMBNAIL.to_string(),
            platform: Platform::Unknown,
            is_valid: false,
            download_url: None,
        }
    }

    /// Degraded record for a recognized platform whose metadata could not be fetched.
    pub fn metadata_fallback(platform: Platform) -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            thumbnail_url: FALLBACK_THUMBNAIL.to_string(),
            platform,
            is_valid: true,
            download_url: None,
        }
    }

    /// Merge metadata with the classifier's judgment.
    ///
    /// Every field comes from the metadata except `platform`, which the
    /// classifier owns.
    pub fn merged_with(self, judgment: &PlatformJudgment) -> Self {
        Self {
            platform: judgment.platform.clone(),
            ..self
        }
    }

    /// True when `download_url` points somewhere real.
    pub fn has_download_link(&self) -> bool {
        self.download_url
            .as_deref()
            .is_some_and(|u| !u.is_empty() && u != DOWNLOAD_PLACEHOLDER)
    }

    /// Whether a caller should render this as a result rather than an error.
    pub fn is_displayable(&self) -> bool {
        self.is_valid && !self.platform.is_unknown()
    }
}
