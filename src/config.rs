//! Configuration types for infographic generation.
//!
//! All pipeline behaviour is controlled through [`InfographicConfig`], built
//! via its [`InfographicConfigBuilder`]. The config carries the one required
//! credential (the Google Generative Language API key) plus model choices,
//! timeouts, and the optional structure-planning stage.
//!
//! The key is never read implicitly: call
//! [`InfographicConfigBuilder::api_key_from_env`] (or [`InfographicConfig::from_env`])
//! to pick it up from `GOOGLE_API_KEY` / `GEMINI_API_KEY`. This keeps
//! `InfographicConfig::default()` hermetic for tests.

use crate::error::InfographicError;
use crate::progress::ProgressCallback;
use edgequake_llm::LLMProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Environment variables checked (in order) for the API key.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

/// Value shipped in `.env` templates; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// Minimum trimmed length of the legal text, in characters.
pub const MIN_TEXT_CHARS: usize = 50;

pub const DEFAULT_TEXT_PROVIDER: &str = "gemini";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for an infographic pipeline.
///
/// Built via [`InfographicConfig::builder()`] or using
/// [`InfographicConfig::default()`].
///
/// # Example
/// ```rust
/// use lawgic::{InfographicConfig, Style};
///
/// let config = InfographicConfig::builder()
///     .api_key("my-key")
///     .style(Style::Classic)
///     .plan_structure(true)
///     .build()
///     .unwrap();
/// assert!(config.plan_structure);
/// ```
#[derive(Clone)]
pub struct InfographicConfig {
    /// Credential gating every model call. `None` fails the request with a
    /// configuration error before any network traffic.
    pub api_key: Option<String>,

    /// edgequake-llm provider name used for text generation. Default: "gemini".
    pub text_provider_name: String,

    /// Text-generation model id. Default: "gemini-2.0-flash".
    pub text_model: String,

    /// Pre-constructed text provider. Takes precedence over `text_provider_name`.
    pub text_provider: Option<Arc<dyn LLMProvider>>,

    /// Image-generation model id.
    pub image_model: String,

    /// Base URL of the Generative Language API.
    pub image_endpoint: String,

    /// Sampling temperature for text generation. Default: 0.2.
    pub temperature: f32,

    /// Maximum tokens the text model may generate. Default: 2048.
    pub max_tokens: usize,

    /// Per-model-call timeout in seconds. Default: 120.
    pub api_timeout_secs: u64,

    /// Maximum concurrent illustration calls. Default: 6.
    pub concurrency: usize,

    /// Minimum trimmed input length in characters. Default: 50.
    pub min_text_chars: usize,

    /// Run the structure-planning stage alongside extraction. Default: false.
    pub plan_structure: bool,

    /// Art direction used when the submission does not pick one.
    pub style: Style,

    /// Stage events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for InfographicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            text_provider_name: DEFAULT_TEXT_PROVIDER.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            text_provider: None,
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            image_endpoint: DEFAULT_IMAGE_ENDPOINT.to_string(),
            temperature: 0.2,
            max_tokens: 2048,
            api_timeout_secs: 120,
            concurrency: 6,
            min_text_chars: MIN_TEXT_CHARS,
            plan_structure: false,
            style: Style::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for InfographicConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfographicConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("text_provider_name", &self.text_provider_name)
            .field("text_model", &self.text_model)
            .field(
                "text_provider",
                &self.text_provider.as_ref().map(|_| "<dyn LLMProvider>"),
            )
            .field("image_model", &self.image_model)
            .field("image_endpoint", &self.image_endpoint)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("concurrency", &self.concurrency)
            .field("min_text_chars", &self.min_text_chars)
            .field("plan_structure", &self.plan_structure)
            .field("style", &self.style)
            .finish()
    }
}

impl InfographicConfig {
    /// Create a new builder for `InfographicConfig`.
    pub fn builder() -> InfographicConfigBuilder {
        InfographicConfigBuilder {
            config: Self::default(),
        }
    }

    /// Default configuration with the API key taken from the environment.
    pub fn from_env() -> Result<Self, InfographicError> {
        Self::builder().api_key_from_env().build()
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    /// The usable API key, or a configuration error naming the env var.
    ///
    /// Blank keys and the template placeholder count as missing.
    pub fn require_api_key(&self) -> Result<&str, InfographicError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != PLACEHOLDER_API_KEY => Ok(key),
            _ => Err(InfographicError::configuration(format!(
                "Google API Key not found. Please add {} to your .env file.",
                API_KEY_ENV_VARS[0]
            ))),
        }
    }
}

/// Builder for [`InfographicConfig`].
pub struct InfographicConfigBuilder {
    config: InfographicConfig,
}

impl fmt::Debug for InfographicConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfographicConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl InfographicConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Fill `api_key` from the first non-empty variable in [`API_KEY_ENV_VARS`],
    /// unless a key was already set.
    pub fn api_key_from_env(mut self) -> Self {
        if self.config.api_key.is_none() {
            self.config.api_key = API_KEY_ENV_VARS
                .iter()
                .filter_map(|var| std::env::var(var).ok())
                .find(|v| !v.trim().is_empty());
        }
        self
    }

    pub fn text_provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.text_provider_name = name.into();
        self
    }

    pub fn text_model(mut self, model: impl Into<String>) -> Self {
        self.config.text_model = model.into();
        self
    }

    pub fn text_provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.text_provider = Some(provider);
        self
    }

    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.config.image_model = model.into();
        self
    }

    pub fn image_endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.image_endpoint = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n;
        self
    }

    pub fn min_text_chars(mut self, n: usize) -> Self {
        self.config.min_text_chars = n;
        self
    }

    pub fn plan_structure(mut self, v: bool) -> Self {
        self.config.plan_structure = v;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.config.style = style;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// A missing key is *not* a build error; it is reported when a request
    /// runs so that it surfaces as a user-visible configuration error.
    pub fn build(self) -> Result<InfographicConfig, InfographicError> {
        let c = &self.config;
        if c.concurrency == 0 {
            return Err(InfographicError::configuration("Concurrency must be ≥ 1"));
        }
        if c.api_timeout_secs == 0 {
            return Err(InfographicError::configuration("API timeout must be ≥ 1s"));
        }
        if c.min_text_chars == 0 {
            return Err(InfographicError::configuration(
                "Minimum text length must be ≥ 1",
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Art direction forwarded to the image prompts.
///
/// Style never changes the analysis schema; it only adds context to the
/// rendering prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Modern, professional, flat illustration. (default)
    #[default]
    Modern,
    /// Engraved, muted, traditional legal-document look.
    Classic,
    /// Expressive, painterly, hand-drawn feel.
    Artistic,
}

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Modern => "modern",
            Style::Classic => "classic",
            Style::Artistic => "artistic",
        }
    }

    /// One-line art direction inserted into image prompts.
    pub fn direction(self) -> &'static str {
        match self {
            Style::Modern => "a modern, professional, flat illustration style with clean geometric shapes",
            Style::Classic => "a classic, refined style reminiscent of engraved legal documents, with muted tones and fine line work",
            Style::Artistic => "an artistic, hand-drawn style with expressive brush strokes and soft watercolour textures",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = InfographicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Ok(Style::Modern),
            "classic" => Ok(Style::Classic),
            "artistic" => Ok(Style::Artistic),
            other => Err(InfographicError::configuration(format!(
                "Unknown style '{other}' (expected modern, classic, or artistic)"
            ))),
        }
    }
}
