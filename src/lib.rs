//! # lawgic
//!
//! Turn legal text into AI-generated infographics.
//!
//! Legal documents are dense. This crate reads a statute, contract clause, or
//! judgment (pasted, or uploaded as PDF, DOCX, or TXT), has a text model
//! extract its key concepts into a small, validated JSON shape, and has an
//! image model render those concepts as a clean infographic.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Submission
//!  │
//!  ├─ 1. Check   API credential present (no network traffic otherwise)
//!  ├─ 2. Load    PDF / DOCX / TXT / pasted text → plain text (≥ 50 chars)
//!  ├─ 3. Extract one structured text-model call → validated analysis
//!  ├─ 3b. Plan   optional layout description, concurrent with extraction
//!  ├─ 4. Render  per-point illustrations, or one composite infographic
//!  └─ 5. Output  InfographicData / SubmissionResponse
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lawgic::{ConceptPair, InfographicConfig, InfographicPipeline, Style, Submission};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Key from GOOGLE_API_KEY (or GEMINI_API_KEY)
//!     let config = InfographicConfig::builder()
//!         .api_key_from_env()
//!         .style(Style::Classic)
//!         .build()?;
//!     let pipeline = InfographicPipeline::<ConceptPair>::from_config(config)?;
//!
//!     let text = std::fs::read_to_string("clause.txt")?;
//!     let response = pipeline.submit(Submission::from_text(text)).await;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Analysis Shapes
//!
//! | Shape | Output |
//! |-------|--------|
//! | [`IllustratedPoints`] | 3–6 points, one text-free illustration each |
//! | [`ConceptPair`] | two concepts side by side |
//! | [`BalanceScale`] | two interests on the scales of justice |
//! | [`ConceptClover`] | four connected concepts |
//! | [`ConceptMap`] | 2–8 concepts with their relationships |
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `lawgic` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! lawgic-infographic = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod schema;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{InfographicConfig, InfographicConfigBuilder, Style};
pub use error::{
    ErrorKind, ExtractionError, FieldErrors, InfographicError, ModelError, SchemaViolation,
    ValidationError,
};
pub use generate::InfographicPipeline;
pub use model::{ImageModel, TextModel, TextRequest};
pub use output::{
    ErrorPayload, IllustratedPoint, InfographicData, RenderedImage, SubmissionResponse,
};
pub use pipeline::loader::{MediaKind, SourceDocument, Submission, UploadedFile};
pub use progress::{NoopProgressCallback, PipelineProgressCallback, ProgressCallback, Stage};
pub use schema::{
    Analysis, BalanceScale, ConceptClover, ConceptDetail, ConceptMap, ConceptPair,
    IllustratedPoints, KeyConcept, Point,
};
