//! Seams to the hosted AI services.
//!
//! The pipeline depends on exactly two capabilities:
//!
//! * [`TextModel`]: "prompt (+ target JSON schema) in, text out".
//! * [`ImageModel`]: "prompt in, inline image payload (maybe) out".
//!
//! Both are object-safe and `Send + Sync`; clients are created once per
//! process and shared through `Arc` by the orchestrator. Production
//! implementations live in [`text`] (edgequake-llm) and [`gemini`]
//! (Gemini `generateContent`); tests substitute scripted mocks.

pub mod gemini;
pub mod text;

use crate::error::ModelError;
use crate::output::RenderedImage;
use async_trait::async_trait;

pub use gemini::GeminiImageModel;
pub use text::LlmTextModel;

/// One text-generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    /// Optional system instruction.
    pub system: Option<String>,
    /// The user prompt.
    pub prompt: String,
    /// JSON Schema the reply must satisfy, for structured-output calls.
    pub response_schema: Option<serde_json::Value>,
}

impl TextRequest {
    /// A free-text request.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    /// A request whose reply must be JSON matching `schema`.
    pub fn structured(prompt: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// A hosted text-generation model.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Issue exactly one generation call and return the raw reply text.
    async fn generate(&self, request: &TextRequest) -> Result<String, ModelError>;
}

/// A hosted image-generation model.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Issue exactly one generation call.
    ///
    /// `Ok(None)` means the service answered but the reply carried no image
    /// (e.g. text only); the pipeline treats that as a failed render.
    async fn generate_image(&self, prompt: &str) -> Result<Option<RenderedImage>, ModelError>;
}
