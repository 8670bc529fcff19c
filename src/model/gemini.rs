//! Image generation through the Gemini `generateContent` endpoint.
//!
//! The request declares `responseModalities: ["TEXT", "IMAGE"]`; the reply
//! interleaves text parts and `inlineData` parts. The first inline part with
//! an `image/*` MIME type becomes the [`RenderedImage`].

use super::ImageModel;
use crate::config::InfographicConfig;
use crate::error::{InfographicError, ModelError};
use crate::output::RenderedImage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ── Payload types ────────────────────────────────────────────────────────

/// Content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    /// Anything else (function calls, thoughts, …); ignored.
    Other(serde_json::Value),
}

/// Base64 inline payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidate completion item.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// The first inline image across all candidates.
    pub fn first_image(&self) -> Option<RenderedImage> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|part| match part {
                Part::InlineData { inline_data }
                    if inline_data.mime_type.starts_with("image/")
                        && !inline_data.data.is_empty() =>
                {
                    Some(RenderedImage::new(
                        inline_data.mime_type.clone(),
                        inline_data.data.clone(),
                    ))
                }
                _ => None,
            })
    }
}

// ── Client ───────────────────────────────────────────────────────────────

/// [`ImageModel`] that calls Gemini over HTTPS.
#[derive(Clone)]
pub struct GeminiImageModel {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiImageModel {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from the config; fails when no usable key is set.
    pub fn from_config(config: &InfographicConfig) -> Result<Self, InfographicError> {
        let key = config.require_api_key()?;
        Ok(Self::new(
            config.image_endpoint.clone(),
            config.image_model.clone(),
            key,
        ))
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

fn build_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part::Text {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["TEXT", "IMAGE"],
        },
    }
}

#[async_trait]
impl ImageModel for GeminiImageModel {
    async fn generate_image(&self, prompt: &str) -> Result<Option<RenderedImage>, ModelError> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(prompt))
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;

        let image = parsed.first_image();
        debug!(
            "Image model {}: {}",
            self.model,
            image
                .as_ref()
                .map(|i| format!("{} bytes base64 ({})", i.data.len(), i.mime_type))
                .unwrap_or_else(|| "no image in reply".to_string())
        );
        Ok(image)
    }
}
