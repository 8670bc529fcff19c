//! The orchestrator: one submission in, one infographic (or one error) out.
//!
//! ```text
//! Received ─▶ credential check ─▶ Loaded ─▶ Extracted ─┬─▶ Rendered ─▶ Assembled
//!                                            Planned ───┘   (plan is optional)
//! ```
//!
//! Every stage is fatal: the first failure aborts the request and nothing
//! partial is returned. There is no retry at any level.

use crate::config::InfographicConfig;
use crate::error::InfographicError;
use crate::model::{GeminiImageModel, ImageModel, LlmTextModel, TextModel};
use crate::output::{ErrorPayload, InfographicData, SubmissionResponse};
use crate::pipeline::loader::{self, Submission};
use crate::pipeline::{extract, plan, render};
use crate::progress::Stage;
use crate::schema::Analysis;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Message shown in place of internal error details.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Infographic generation for analysis shape `A`.
///
/// Clients are created once and shared; the pipeline itself holds no
/// per-request state, so one instance can serve concurrent submissions.
///
/// # Example
///
/// ```rust,no_run
/// use lawgic::{ConceptClover, InfographicConfig, InfographicPipeline, Submission};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = InfographicConfig::from_env()?;
///     let pipeline = InfographicPipeline::<ConceptClover>::from_config(config)?;
///     let text = std::fs::read_to_string("statute.txt")?;
///     let data = pipeline.run(Submission::from_text(text)).await?;
///     println!("{} image(s)", data.images().len());
///     Ok(())
/// }
/// ```
pub struct InfographicPipeline<A: Analysis> {
    config: InfographicConfig,
    text_model: Arc<dyn TextModel>,
    image_model: Arc<dyn ImageModel>,
    _shape: PhantomData<fn() -> A>,
}

impl<A: Analysis> Clone for InfographicPipeline<A> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            text_model: Arc::clone(&self.text_model),
            image_model: Arc::clone(&self.image_model),
            _shape: PhantomData,
        }
    }
}

impl<A: Analysis> std::fmt::Debug for InfographicPipeline<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfographicPipeline")
            .field("shape", &A::NAME)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<A: Analysis> InfographicPipeline<A> {
    /// Pipeline over injected model clients.
    pub fn new(
        config: InfographicConfig,
        text_model: Arc<dyn TextModel>,
        image_model: Arc<dyn ImageModel>,
    ) -> Self {
        Self {
            config,
            text_model,
            image_model,
            _shape: PhantomData,
        }
    }

    /// Pipeline over the production clients.
    ///
    /// Fails with a configuration error, before any network call, when the
    /// key is missing or the text provider cannot be created.
    pub fn from_config(config: InfographicConfig) -> Result<Self, InfographicError> {
        let image_model = GeminiImageModel::from_config(&config)?;
        let text_model = LlmTextModel::from_config(&config)?;
        Ok(Self::new(config, Arc::new(text_model), Arc::new(image_model)))
    }

    pub fn config(&self) -> &InfographicConfig {
        &self.config
    }

    /// Run one submission through every stage.
    pub async fn run(&self, submission: Submission) -> Result<InfographicData<A>, InfographicError> {
        let start = Instant::now();
        self.completed(Stage::Received);

        self.config
            .require_api_key()
            .inspect_err(|e| self.failed(Stage::Received, e))?;

        let document = self
            .stage(Stage::Loaded, async {
                loader::load(&submission, self.config.min_text_chars)
                    .await
                    .map_err(InfographicError::from)
            })
            .await?;

        let style = submission.style.unwrap_or(self.config.style);
        let text_model = self.text_model.as_ref();

        let (analysis, structure) = if self.config.plan_structure {
            let (analysis, structure) = tokio::try_join!(
                self.stage(
                    Stage::Extracted,
                    extract::extract::<A>(text_model, &document.text, &self.config)
                ),
                self.stage(
                    Stage::Planned,
                    plan::plan_structure(text_model, &document.text, &self.config)
                ),
            )?;
            (analysis, Some(structure))
        } else {
            let analysis = self
                .stage(
                    Stage::Extracted,
                    extract::extract::<A>(text_model, &document.text, &self.config),
                )
                .await?;
            (analysis, None)
        };

        let images = self
            .stage(
                Stage::Rendered,
                render::render(
                    self.image_model.as_ref(),
                    &analysis,
                    structure.as_deref(),
                    style,
                    &self.config,
                ),
            )
            .await?;

        let data = InfographicData::new(analysis, images, structure, style);
        self.completed(Stage::Assembled);
        info!(
            "Infographic ({}) assembled in {}ms: {}",
            A::NAME,
            start.elapsed().as_millis(),
            data.analysis().describe()
        );
        Ok(data)
    }

    /// Run a submission and shape the outcome for the presentation layer.
    ///
    /// Validation errors become per-field messages; every other error becomes
    /// its display message, except unexpected errors, which are logged and
    /// replaced by [`UNEXPECTED_ERROR_MESSAGE`].
    pub async fn submit(&self, submission: Submission) -> SubmissionResponse<A> {
        match self.run(submission).await {
            Ok(data) => SubmissionResponse::success(data),
            Err(e) => SubmissionResponse::failure(error_payload(&e)),
        }
    }

    async fn stage<T, F>(&self, stage: Stage, work: F) -> Result<T, InfographicError>
    where
        F: Future<Output = Result<T, InfographicError>>,
    {
        if let Some(ref cb) = self.config.progress_callback {
            cb.on_stage_start(stage);
        }
        match work.await {
            Ok(value) => {
                self.completed(stage);
                Ok(value)
            }
            Err(e) => {
                self.failed(stage, &e);
                Err(e)
            }
        }
    }

    fn completed(&self, stage: Stage) {
        if let Some(ref cb) = self.config.progress_callback {
            cb.on_stage_complete(stage);
        }
    }

    fn failed(&self, stage: Stage, e: &InfographicError) {
        warn!("Request failed during {}: {}", stage, e);
        if let Some(ref cb) = self.config.progress_callback {
            cb.on_failed(stage, &e.to_string());
            cb.on_stage_complete(Stage::Failed);
        }
    }
}

/// The outbound error payload for `e`.
pub fn error_payload(e: &InfographicError) -> ErrorPayload {
    match e {
        InfographicError::Validation(v) => ErrorPayload::Fields(v.to_field_errors()),
        InfographicError::Unexpected(detail) => {
            error!("Unexpected error: {}", detail);
            ErrorPayload::Message(UNEXPECTED_ERROR_MESSAGE.to_string())
        }
        other => ErrorPayload::Message(other.to_string()),
    }
}
