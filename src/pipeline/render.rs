//! Image rendering: turn an analysis into one or more rendered images.
//!
//! The analysis picks the mode through [`Analysis::render_plan`]:
//!
//! * **Illustrations**: one text-free image per point. Calls run
//!   concurrently, at most `config.concurrency` at a time, and are collected
//!   in point order. The first failure fails the whole stage.
//! * **Composite**: a single call whose prompt carries every extracted
//!   string verbatim.

use super::with_timeout;
use crate::config::{InfographicConfig, Style};
use crate::error::InfographicError;
use crate::model::ImageModel;
use crate::output::RenderedImage;
use crate::progress::Stage;
use crate::schema::{Analysis, RenderContext, RenderPlan};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::time::Instant;
use tracing::{debug, info, warn};

pub async fn render<A: Analysis>(
    model: &dyn ImageModel,
    analysis: &A,
    structure: Option<&str>,
    style: Style,
    config: &InfographicConfig,
) -> Result<Vec<RenderedImage>, InfographicError> {
    let start = Instant::now();
    let plan = analysis.render_plan(&RenderContext { style, structure });
    let count = plan.image_count();

    let images = match plan {
        RenderPlan::Composite(prompt) => vec![render_one(model, None, &prompt, config).await?],
        RenderPlan::Illustrations(prompts) => {
            stream::iter(prompts.into_iter().enumerate())
                .map(|(i, prompt)| async move {
                    render_one(model, Some(i), &prompt, config).await
                })
                .buffered(config.concurrency.max(1))
                .try_collect::<Vec<_>>()
                .await?
        }
    };

    info!(
        "Rendered {} image(s) for {} in {}ms",
        count,
        A::NAME,
        start.elapsed().as_millis()
    );
    Ok(images)
}

/// One image call. `index` is `Some` for per-point illustrations.
async fn render_one(
    model: &dyn ImageModel,
    index: Option<usize>,
    prompt: &str,
    config: &InfographicConfig,
) -> Result<RenderedImage, InfographicError> {
    debug!("Image call {:?}: prompt {} chars", index, prompt.len());

    let reply = with_timeout(
        Stage::Rendered,
        config.api_timeout(),
        model.generate_image(prompt),
    )
    .await?;

    match reply {
        Ok(Some(image)) => {
            debug!(
                "Image call {:?}: {} ({} base64 bytes)",
                index,
                image.mime_type,
                image.data.len()
            );
            Ok(image)
        }
        Ok(None) => {
            warn!("Image call {:?}: reply carried no image payload", index);
            Err(InfographicError::ImageGeneration {
                index,
                detail: "the model returned no image data".to_string(),
            })
        }
        Err(e) => {
            warn!("Image call {:?} failed: {}", index, e);
            Err(InfographicError::ImageGeneration {
                index,
                detail: e.to_string(),
            })
        }
    }
}
