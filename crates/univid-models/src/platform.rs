//! Video platform classification models.

use std::fmt;

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Video platform as judged by the classifier.
///
/// Serialized as a bare string. Names outside the known set are kept
/// verbatim in [`Platform::Other`] so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    YouTube,
    TikTok,
    Instagram,
    Facebook,
    Vimeo,
    X,
    /// Classifier could not identify the platform
    #[default]
    Unknown,
    /// Any name the classifier returned outside the known set
    Other(String),
}

impl Platform {
    /// Platforms the classifier is asked to recognize.
    pub const KNOWN: [Platform; 6] = [
        Platform::YouTube,
        Platform::TikTok,
        Platform::Instagram,
        Platform::Facebook,
        Platform::Vimeo,
        Platform::X,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Vimeo => "Vimeo",
            Platform::X => "X",
            Platform::Unknown => "Unknown",
            Platform::Other(name) => name,
        }
    }

    /// Parse a platform name. Known names match case-insensitively.
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        Self::KNOWN
            .iter()
            .chain(std::iter::once(&Platform::Unknown))
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Platform::Other(trimmed.to_string()))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Platform::Unknown)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Platform {
    fn from(s: String) -> Self {
        Platform::parse(&s)
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        Platform::parse(s)
    }
}

impl From<Platform> for String {
    fn from(p: Platform) -> Self {
        match p {
            Platform::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl JsonSchema for Platform {
    fn schema_name() -> String {
        "Platform".to_string()
    }

    fn is_referenceable() -> bool {
        false
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

/// Coarse classifier verdict for a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlatformJudgment {
    pub platform: Platform,
    #[serde(rename = "isValid")]
    pub is_valid: bool,
}

impl PlatformJudgment {
    pub fn new(platform: impl Into<Platform>, is_valid: bool) -> Self {
        Self {
            platform: platform.into(),
            is_valid,
        }
    }

    /// The judgment substituted when the classifier itself fails.
    pub fn unknown() -> Self {
        Self {
            platform: Platform::Unknown,
            is_valid: false,
        }
    }

    /// Whether the metadata lookup should proceed.
    pub fn is_recognized(&self) -> bool {
        self.is_valid && !self.platform.is_unknown()
    }
}
