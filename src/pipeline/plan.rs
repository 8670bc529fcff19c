//! Structure planning: a free-text description of a simple infographic
//! layout, interpolated into composite prompts as layout guidance.

use super::{postprocess, with_timeout};
use crate::config::InfographicConfig;
use crate::error::InfographicError;
use crate::model::{TextModel, TextRequest};
use crate::progress::Stage;
use crate::prompts;
use tracing::{debug, info, warn};

pub async fn plan_structure(
    model: &dyn TextModel,
    legal_text: &str,
    config: &InfographicConfig,
) -> Result<String, InfographicError> {
    let request = TextRequest::text(prompts::structure_prompt(legal_text));
    debug!("Structure planning: prompt {} chars", request.prompt.len());

    let reply = with_timeout(Stage::Planned, config.api_timeout(), model.generate(&request))
        .await?
        .map_err(|e| {
            warn!("Structure planning failed: {}", e);
            InfographicError::StructurePlanning {
                detail: e.to_string(),
            }
        })?;

    let plan = postprocess::clean_text_reply(&reply);
    if plan.is_empty() {
        warn!("Structure planning returned an empty reply");
        return Err(InfographicError::StructurePlanning {
            detail: "the model returned an empty layout description".to_string(),
        });
    }

    info!("Planned structure ({} chars)", plan.len());
    Ok(plan)
}
