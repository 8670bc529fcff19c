//! Concept extraction: one structured text-model call per request.
//!
//! The reply is cleaned, parsed into the pipeline's analysis shape, and
//! validated. Any failure along the way fails the request; there is no retry
//! and no repair call.

use super::{postprocess, with_timeout};
use crate::config::InfographicConfig;
use crate::error::{ExtractionError, InfographicError};
use crate::model::{TextModel, TextRequest};
use crate::progress::Stage;
use crate::prompts;
use crate::schema::Analysis;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Build the extraction request for shape `A`.
pub fn extraction_request<A: Analysis>(legal_text: &str) -> TextRequest {
    TextRequest::structured(
        prompts::extraction_prompt(A::extraction_instructions(), legal_text),
        A::response_schema(),
    )
    .with_system(prompts::ANALYST_SYSTEM_PROMPT)
}

/// Extract a validated `A` from `legal_text`.
pub async fn extract<A: Analysis>(
    model: &dyn TextModel,
    legal_text: &str,
    config: &InfographicConfig,
) -> Result<A, InfographicError> {
    let start = Instant::now();
    let request = extraction_request::<A>(legal_text);
    debug!(
        "Extraction ({}): prompt {} chars",
        A::NAME,
        request.prompt.len()
    );

    let reply = with_timeout(Stage::Extracted, config.api_timeout(), model.generate(&request))
        .await?
        .map_err(ExtractionError::from)
        .inspect_err(|e| warn!("Extraction ({}) failed: {}", A::NAME, e))?;

    let analysis = parse_reply::<A>(&reply)
        .inspect_err(|e| warn!("Extraction ({}) rejected: {}", A::NAME, e))?;

    info!(
        "Extracted {} in {}ms",
        analysis.describe(),
        start.elapsed().as_millis()
    );
    Ok(analysis)
}

/// Clean, parse, and validate a raw reply.
pub fn parse_reply<A: Analysis>(reply: &str) -> Result<A, ExtractionError> {
    let cleaned = postprocess::clean_json_reply(reply);
    let analysis: A = serde_json::from_str(&cleaned)
        .map_err(|e| ExtractionError::MalformedOutput(e.to_string()))?;
    analysis.validate()?;
    Ok(analysis)
}
