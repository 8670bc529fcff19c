//! Pipeline stages and the progress-callback trait.
//!
//! A request moves through a linear state machine:
//!
//! ```text
//! Received → Loaded → Extracted → (Planned | skipped) → Rendered → Assembled
//!     └──────────────── any failure ────────────────────────────▶ Failed
//! ```
//!
//! Inject an [`Arc<dyn PipelineProgressCallback>`] via
//! [`crate::config::InfographicConfigBuilder::progress_callback`] to receive
//! an event as each stage starts and finishes.
//!
//! # Example
//!
//! ```rust
//! use lawgic::{InfographicConfig, PipelineProgressCallback, Stage};
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! impl PipelineProgressCallback for Printer {
//!     fn on_stage_complete(&self, stage: Stage) {
//!         eprintln!("{stage} done");
//!     }
//! }
//!
//! let config = InfographicConfig::builder()
//!     .api_key("test-key")
//!     .progress_callback(Arc::new(Printer) as Arc<dyn PipelineProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A state of the request pipeline.
///
/// Work-performing states (`Loaded`, `Extracted`, `Planned`, `Rendered`) are
/// named after what is true once they complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Received,
    Loaded,
    Extracted,
    Planned,
    Rendered,
    Assembled,
    Failed,
}

impl Stage {
    /// Human-readable label for the work leading into this state.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Received => "receiving submission",
            Stage::Loaded => "document loading",
            Stage::Extracted => "concept extraction",
            Stage::Planned => "structure planning",
            Stage::Rendered => "image rendering",
            Stage::Assembled => "assembly",
            Stage::Failed => "failure",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Called by the pipeline as it moves between stages.
///
/// All methods default to no-ops. When structure planning is enabled,
/// `Extracted` and `Planned` events can arrive from concurrently running
/// futures, so implementations must be `Send + Sync`.
pub trait PipelineProgressCallback: Send + Sync {
    /// Work towards `stage` is starting.
    fn on_stage_start(&self, stage: Stage) {
        let _ = stage;
    }

    /// `stage` has been reached.
    fn on_stage_complete(&self, stage: Stage) {
        let _ = stage;
    }

    /// The request failed while working towards `stage`.
    fn on_failed(&self, stage: Stage, error: &str) {
        let _ = (stage, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl PipelineProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::InfographicConfig`].
pub type ProgressCallback = Arc<dyn PipelineProgressCallback>;
