//! HTTP transport for the Gemini generateContent endpoint
//!
//! One [`GenerateTransport`] call is one logical request attempt; the retry
//! loop lives above this layer in the generator.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use crate::gemini::error::GeminiApiError;
use crate::gemini::schema::response_schema;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use troupe_domain::{Model, PromptPayload};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request timeout when the config does not override it.
///
/// Video analysis replies can be slow, so this is generous; exceeding it is
/// a non-retriable failure.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

const TEMPERATURE: f64 = 0.8;

/// One logical request attempt against the generation capability
///
/// Returns the raw reply body on HTTP success; schema parsing happens in
/// the generator so that fakes can exercise the full coercion path.
#[async_trait]
pub trait GenerateTransport: Send + Sync {
    async fn generate_content(
        &self,
        model: &Model,
        payload: &PromptPayload,
    ) -> Result<String, GeminiApiError>;
}

/// reqwest-backed transport for the Gemini REST API
pub struct HttpTransport {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport with the API key from `GEMINI_API_KEY`.
    pub fn from_env(timeout: Duration) -> Result<Self, GeminiApiError> {
        let api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| GeminiApiError::MissingApiKey)?;
        Self::new(api_key, timeout)
    }

    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, GeminiApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the transport at a different endpoint (for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_body(payload: &PromptPayload) -> serde_json::Value {
        let mut parts = vec![json!({ "text": payload.text })];
        if let Some(media) = &payload.media {
            parts.push(json!({
                "inlineData": {
                    "mimeType": media.mime_type,
                    "data": BASE64.encode(&media.data),
                }
            }));
        }

        json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
                "temperature": TEMPERATURE,
            },
        })
    }
}

#[async_trait]
impl GenerateTransport for HttpTransport {
    async fn generate_content(
        &self,
        model: &Model,
        payload: &PromptPayload,
    ) -> Result<String, GeminiApiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model.as_str());
        debug!("POST {} ({} prompt chars)", url, payload.text.len());

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(payload))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GeminiApiError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use troupe_domain::VideoRef;

    #[test]
    fn test_request_body_text_only() {
        let payload = PromptPayload {
            text: "comment on this".to_string(),
            media: None,
        };
        let body = HttpTransport::request_body(&payload);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "comment on this");
        assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 1);
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_request_body_attaches_inline_media() {
        let video = VideoRef::with_media("v.mp4", "video/mp4", vec![1, 2, 3]);
        let payload = PromptPayload {
            text: "t".to_string(),
            media: video.media,
        };
        let body = HttpTransport::request_body(&payload);
        let inline = &body["contents"][0]["parts"][1]["inlineData"];
        assert_eq!(inline["mimeType"], "video/mp4");
        assert_eq!(inline["data"], BASE64.encode([1u8, 2, 3]));
    }

    #[test]
    fn test_schema_is_always_sent() {
        let payload = PromptPayload {
            text: "t".to_string(),
            media: None,
        };
        let body = HttpTransport::request_body(&payload);
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }
}
