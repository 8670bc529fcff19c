//! Pipeline stages for legal-text-to-infographic generation.
//!
//! Each submodule implements exactly one step; [`crate::generate`] wires
//! them together.
//!
//! ## Data Flow
//!
//! ```text
//! loader ──▶ extract ──┬──▶ render ──▶ (assemble)
//! (pdf/docx)  (text LLM) │   (image model)
//!            plan ──────┘
//!           (optional, concurrent with extract)
//! ```
//!
//! 1. [`loader`]: classify the upload, pull plain text out of it, and
//!    enforce the minimum length; PDF/DOCX parsing runs in `spawn_blocking`
//! 2. [`extract`]: one structured text-model call producing an analysis
//! 3. [`plan`]: one free-text call describing a simple layout
//! 4. [`render`]: per-point illustrations or a single composite image
//! 5. [`postprocess`]: deterministic cleanup of model replies before parsing
//! 6. [`encode`]: base64/data-URI handling for rendered images

pub mod encode;
pub mod extract;
pub mod loader;
pub mod plan;
pub mod postprocess;
pub mod render;

use crate::error::InfographicError;
use crate::progress::Stage;
use std::future::Future;
use std::time::Duration;

/// Bound one model call by `limit`, mapping expiry to [`InfographicError::Timeout`].
pub(crate) async fn with_timeout<T, F>(
    stage: Stage,
    limit: Duration,
    call: F,
) -> Result<T, InfographicError>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| InfographicError::Timeout {
            stage,
            secs: limit.as_secs(),
        })
}
