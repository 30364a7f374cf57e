//! Gemini client for platform classification.
//!
//! Asks the model which video platform a URL belongs to and constrains the
//! reply to a `{platform, isValid}` JSON object via a response schema.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};
use univid_client::{ClientError, ClientResult, PlatformClassifier};
use univid_models::PlatformJudgment;

use crate::security::sanitize_string;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub type GeminiResult<T> = Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("API_KEY not configured")]
    NotConfigured,

    #[error("Gemini API request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Gemini API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No content in Gemini response")]
    EmptyResponse,

    #[error("Failed to parse platform JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for GeminiError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs must never reach logs or error strings
        Self::Request(e.without_url())
    }
}

/// Header carrying the provider secret.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Classifier settings.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Provider secret; the classifier endpoint answers 503 without it
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GeminiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("GEMINI_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Gemini API client for platform classification.
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiClient {
    /// Create a new Gemini client. Fails with [`GeminiError::NotConfigured`]
    /// when no API key is set.
    pub fn new(config: &GeminiConfig) -> GeminiResult<Self> {
        let api_key = config.api_key.clone().ok_or(GeminiError::NotConfigured)?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Identify the video platform of `url`.
    pub async fn classify_platform(&self, url: &str) -> GeminiResult<PlatformJudgment> {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_platform_prompt(url),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: platform_schema(),
            },
        };

        info!("Classifying platform with model: {}", self.model);

        let response = self
            .client
            .post(&endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status { status, body });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or(GeminiError::EmptyResponse)?;

        debug!("Gemini platform reply: {}", text);
        Ok(serde_json::from_str(strip_code_fence(text))?)
    }
}

#[async_trait]
impl PlatformClassifier for GeminiClient {
    async fn classify(&self, url: &str) -> ClientResult<PlatformJudgment> {
        self.classify_platform(url)
            .await
            .map_err(|e| ClientError::service(e.to_string()))
    }
}

/// Build the classification prompt for a URL.
pub fn build_platform_prompt(url: &str) -> String {
    format!(
        "Analyze the following URL and identify the video platform. The URL is: {}. \
         Respond with only a JSON object matching the provided schema.",
        sanitize_string(url)
    )
}

/// Response schema in Gemini's OpenAPI subset.
fn platform_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "platform": {
                "type": "STRING",
                "description": "The name of the video platform (e.g., YouTube, TikTok, Instagram, Facebook, Vimeo, X). Should be 'Unknown' if the platform cannot be identified or the URL is invalid."
            },
            "isValid": {
                "type": "BOOLEAN",
                "description": "True if the URL is a valid and recognizable video platform URL, otherwise false."
            }
        },
        "required": ["platform", "isValid"]
    })
}

/// Strip a surrounding markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use univid_models::Platform;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reply(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" }
            }]
        })
    }

    async fn client_for(server: &MockServer) -> GeminiClient {
        let config = GeminiConfig::default()
            .with_api_key("test-key")
            .with_base_url(server.uri());
        GeminiClient::new(&config).unwrap()
    }

    #[test]
    fn test_missing_key_is_not_configured() {
        let result = GeminiClient::new(&GeminiConfig::default());
        assert!(matches!(result, Err(GeminiError::NotConfigured)));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = GeminiConfig::default().with_api_key("super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_prompt_embeds_sanitized_url() {
        let prompt = build_platform_prompt("https://vimeo.com/1\n");
        assert!(prompt.contains("The URL is: https://vimeo.com/1."));
    }

    #[tokio::test]
    async fn test_classify_platform_sends_schema_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "required": ["platform", "isValid"] }
                }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(reply(r#"{"platform": "TikTok", "isValid": true}"#)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let judgment = client_for(&server)
            .await
            .classify_platform("https://www.tiktok.com/@user/video/1")
            .await
            .unwrap();

        assert_eq!(judgment, PlatformJudgment::new(Platform::TikTok, true));
    }

    #[tokio::test]
    async fn test_fenced_reply_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(
                "```json\n{\"platform\": \"Unknown\", \"isValid\": false}\n```",
            )))
            .mount(&server)
            .await;

        let judgment = client_for(&server)
            .await
            .classify_platform("https://example.com")
            .await
            .unwrap();

        assert_eq!(judgment, PlatformJudgment::unknown());
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .classify_platform("https://vimeo.com/1")
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::Status { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .classify_platform("https://vimeo.com/1")
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_malformed_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("YouTube, probably")))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .classify_platform("https://youtube.com")
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_expose_key() {
        // Nothing listens on the discard port
        let config = GeminiConfig::default()
            .with_api_key("SUPER-SECRET-KEY")
            .with_base_url("http://127.0.0.1:9");
        let client = GeminiClient::new(&config).unwrap();

        let err = client
            .classify_platform("https://vimeo.com/1")
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::Request(_)));
        assert!(!err.to_string().contains("SUPER-SECRET-KEY"));
        assert!(!format!("{:?}", err).contains("SUPER-SECRET-KEY"));

        let err = PlatformClassifier::classify(&client, "https://vimeo.com/1")
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("SUPER-SECRET-KEY"));
    }

    #[tokio::test]
    async fn test_key_is_not_sent_in_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(reply(r#"{"platform": "Vimeo", "isValid": true}"#)),
            )
            .mount(&server)
            .await;

        client_for(&server)
            .await
            .classify_platform("https://vimeo.com/1")
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_classifier_trait_maps_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = PlatformClassifier::classify(&client, "https://vimeo.com/1")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Service(_)));
    }
}
