//! Text generation through an edgequake-llm provider.
//!
//! ## Message Layout
//!
//! 1. **System message**: the request's system instruction, followed by the
//!    JSON output contract when the request is structured
//! 2. **User message**: the prompt
//!
//! The schema travels inside the system message so every provider
//! edgequake-llm supports can honour it. Structured requests also ask for
//! the provider's JSON response format.

use super::{TextModel, TextRequest};
use crate::config::InfographicConfig;
use crate::error::{InfographicError, ModelError};
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, GeminiProvider, LLMProvider, ProviderFactory};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// [`TextModel`] backed by any `edgequake_llm::LLMProvider`.
#[derive(Clone)]
pub struct LlmTextModel {
    provider: Arc<dyn LLMProvider>,
    temperature: f32,
    max_tokens: usize,
}

impl LlmTextModel {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &InfographicConfig) -> Self {
        Self {
            provider,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Resolve the provider the config asks for.
    ///
    /// 1. **Pre-built provider** (`config.text_provider`): used as-is.
    /// 2. **Gemini**: built from the configured key, the same one the image
    ///    model uses.
    /// 3. **Any other named provider**: created with
    ///    [`ProviderFactory::create_llm_provider`], which reads the provider's
    ///    own API key variable from the environment.
    pub fn from_config(config: &InfographicConfig) -> Result<Self, InfographicError> {
        if let Some(ref provider) = config.text_provider {
            return Ok(Self::new(Arc::clone(provider), config));
        }

        if uses_google_key(&config.text_provider_name) {
            let key = config.require_api_key()?;
            let provider = GeminiProvider::new(key).with_model(&config.text_model);
            return Ok(Self::new(Arc::new(provider), config));
        }

        let provider =
            ProviderFactory::create_llm_provider(&config.text_provider_name, &config.text_model)
                .map_err(|e| {
                    InfographicError::configuration(format!(
                        "Text provider '{}' is not configured: {e}",
                        config.text_provider_name
                    ))
                })?;
        Ok(Self::new(provider, config))
    }

    fn build_options(&self, request: &TextRequest) -> CompletionOptions {
        CompletionOptions {
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
            response_format: request
                .response_schema
                .as_ref()
                .map(|_| "json_object".to_string()),
            ..Default::default()
        }
    }
}

fn uses_google_key(provider_name: &str) -> bool {
    matches!(
        provider_name.trim().to_ascii_lowercase().as_str(),
        "gemini" | "google"
    )
}

/// System text for a request: its own instruction plus the output contract.
fn system_text(request: &TextRequest) -> Option<String> {
    let contract = request.response_schema.as_ref().map(|schema| {
        format!(
            "Respond with a single JSON object and nothing else. \
             Do not wrap it in markdown fences. \
             The object MUST validate against this JSON Schema:\n{}",
            serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string())
        )
    });

    match (request.system.as_deref(), contract) {
        (Some(sys), Some(contract)) => Some(format!("{sys}\n\n{contract}")),
        (Some(sys), None) => Some(sys.to_string()),
        (None, contract) => contract,
    }
}

#[async_trait]
impl TextModel for LlmTextModel {
    async fn generate(&self, request: &TextRequest) -> Result<String, ModelError> {
        let start = Instant::now();
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_text(request) {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(request.prompt.clone()));

        let options = self.build_options(request);
        let response = self
            .provider
            .chat(&messages, Some(&options))
            .await
            .map_err(|e| ModelError::Provider(e.to_string()))?;

        debug!(
            "Text model: {} input tokens, {} output tokens, {:?}",
            response.prompt_tokens,
            response.completion_tokens,
            start.elapsed()
        );
        Ok(response.content)
    }
}
