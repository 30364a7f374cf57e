//! Request/response envelopes shared by the server and its clients.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Body of both `POST /api/analyze-platform` and `POST /api/video-details`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisRequest {
    /// Raw URL as typed by the user
    #[serde(default)]
    pub url: String,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Only blankness is checked; deciding what the URL points at is the
    /// classifier's job.
    pub fn validate(&self) -> ModelResult<()> {
        if self.url.trim().is_empty() {
            return Err(ModelError::EmptyUrl);
        }
        Ok(())
    }
}

/// JSON body of every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_urls_are_rejected() {
        for url in ["", "   ", "\t\n"] {
            assert_eq!(AnalysisRequest::new(url).validate(), Err(ModelError::EmptyUrl));
        }
    }

    #[test]
    fn test_any_non_blank_url_passes() {
        assert!(AnalysisRequest::new("not even a url").validate().is_ok());
        assert!(AnalysisRequest::new("https://youtu.be/dQw4w9WgXcQ").validate().is_ok());
    }

    #[test]
    fn test_missing_url_field_deserializes_empty() {
        let req: AnalysisRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.url, "");
    }
}
