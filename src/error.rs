//! Error types for the lawgic library.
//!
//! Every failure in the pipeline is fatal for the request: there is no
//! partial infographic, so a single [`InfographicError`] is all a caller ever
//! receives. Its [`ErrorKind`] groups the variants into the five user-facing
//! categories the presentation layer distinguishes (plus `Timeout`).
//!
//! Smaller error types sit underneath it:
//!
//! * [`ValidationError`]: the submission was rejected before any paid call.
//!   Each variant knows which form field it belongs to so it can be surfaced
//!   as [`FieldErrors`].
//! * [`ExtractionError`]: the text model failed or its JSON did not satisfy
//!   the analysis schema.
//! * [`SchemaViolation`]: one broken invariant of an analysis shape.
//! * [`ModelError`]: the seam error returned by [`crate::model::TextModel`]
//!   and [`crate::model::ImageModel`] implementations.

use crate::progress::Stage;
use std::collections::BTreeMap;
use thiserror::Error;

/// Form field carrying the pasted text.
pub const FIELD_TEXT: &str = "legalText";
/// Form field carrying the uploaded file.
pub const FIELD_FILE: &str = "file";

/// Field name → human-readable validation messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// All fatal errors returned by the lawgic pipeline.
#[derive(Debug, Error)]
pub enum InfographicError {
    // ── Configuration ─────────────────────────────────────────────────────
    /// Missing or placeholder credential, or an invalid builder setting.
    #[error("{message}")]
    Configuration { message: String },

    // ── Input ─────────────────────────────────────────────────────────────
    /// The submission failed a precondition; no model call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ── Text generation ───────────────────────────────────────────────────
    /// Concept extraction errored or produced output that fails the schema.
    #[error("Concept extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// The structure-planning call errored or returned nothing.
    #[error("Structure planning failed: {detail}")]
    StructurePlanning { detail: String },

    // ── Image generation ──────────────────────────────────────────────────
    /// The image model errored or its reply carried no image payload.
    #[error("{}", image_failure_message(.index, .detail))]
    ImageGeneration { index: Option<usize>, detail: String },

    // ── Time ──────────────────────────────────────────────────────────────
    /// A model call exceeded the configured timeout.
    #[error("{stage} timed out after {secs}s")]
    Timeout { stage: Stage, secs: u64 },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Anything else. Logged in full, shown to users as a generic message.
    #[error("Internal error: {0}")]
    Unexpected(String),
}

fn image_failure_message(index: &Option<usize>, detail: &str) -> String {
    match index {
        Some(i) => format!("Image generation failed for illustration {}: {detail}", i + 1),
        None => format!("Image generation failed: {detail}"),
    }
}

/// The user-facing error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    ConfigurationError,
    ValidationError,
    ExtractionFailure,
    ImageGenerationFailed,
    Timeout,
    UnexpectedError,
}

impl InfographicError {
    pub fn configuration(message: impl Into<String>) -> Self {
        InfographicError::Configuration {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InfographicError::Configuration { .. } => ErrorKind::ConfigurationError,
            InfographicError::Validation(_) => ErrorKind::ValidationError,
            InfographicError::Extraction(_) | InfographicError::StructurePlanning { .. } => {
                ErrorKind::ExtractionFailure
            }
            InfographicError::ImageGeneration { .. } => ErrorKind::ImageGenerationFailed,
            InfographicError::Timeout { .. } => ErrorKind::Timeout,
            InfographicError::Unexpected(_) => ErrorKind::UnexpectedError,
        }
    }
}

/// Precondition failures detected before any model call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Neither text nor a non-empty file was submitted.
    #[error("Please paste text or upload a file to continue.")]
    MissingInput,

    /// Trimmed text is shorter than the configured minimum.
    #[error("Provided text or file content must be at least {min} characters.")]
    InputTooShort { min: usize, actual: usize },

    /// The uploaded file is not PDF, DOCX, or TXT.
    #[error("Unsupported file type '{name}'. Please use PDF, DOCX, or TXT.")]
    UnsupportedFileType { name: String },

    /// A supported file whose contents could not be parsed.
    #[error("Could not read text from '{name}': {detail}")]
    UnreadableDocument { name: String, detail: String },
}

impl ValidationError {
    /// The form field this error is attached to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingInput | ValidationError::InputTooShort { .. } => FIELD_TEXT,
            ValidationError::UnsupportedFileType { .. }
            | ValidationError::UnreadableDocument { .. } => FIELD_FILE,
        }
    }

    pub fn to_field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.insert(self.field().to_string(), vec![self.to_string()]);
        errors
    }
}

/// Why the extraction stage produced no analysis.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The text model call itself failed.
    #[error("text model call failed: {0}")]
    Model(#[from] ModelError),

    /// The reply was not valid JSON for the expected shape.
    #[error("model output is not valid JSON for the schema: {0}")]
    MalformedOutput(String),

    /// The reply parsed but broke a count or presence invariant.
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
}

/// One broken invariant of an analysis shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("'{field}' must have between {min} and {max} entries, got {actual}")]
    Count {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("'{field}' must not be empty")]
    Blank { field: String },
}

/// Errors raised by model client implementations.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Network-level failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// Provider-library error (edgequake-llm).
    #[error("{0}")]
    Provider(String),
}
