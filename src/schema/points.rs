use super::{check_count, check_text, Analysis, RenderContext, RenderPlan};
use crate::error::SchemaViolation;
use crate::prompts;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const MIN_POINTS: usize = 3;
pub const MAX_POINTS: usize = 6;

/// Title, 3–6 illustrated key points, and a summary.
///
/// The only shape rendered in per-point mode: each point's
/// `illustration_prompt` becomes one decorative image, and the presentation
/// layer composes text and images itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IllustratedPoints {
    /// A short, catchy title for the whole text (at most 8 words).
    pub title: String,
    /// Between 3 and 6 key points.
    #[schemars(length(min = 3, max = 6))]
    pub points: Vec<Point>,
    /// A brief, clear summary (one or two sentences).
    pub summary: String,
}

/// One key point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// A short, catchy title (at most 6 words).
    pub title: String,
    /// A one-sentence explanation.
    pub description: String,
    /// A simple prompt for a text-free illustration of this point.
    #[serde(alias = "illustration_prompt")]
    pub illustration_prompt: String,
}

impl Analysis for IllustratedPoints {
    const NAME: &'static str = "points";

    fn extraction_instructions() -> &'static str {
        prompts::POINTS_INSTRUCTIONS
    }

    fn validate(&self) -> Result<(), SchemaViolation> {
        check_text("title", &self.title)?;
        check_text("summary", &self.summary)?;
        check_count("points", self.points.len(), MIN_POINTS, MAX_POINTS)?;
        for (i, p) in self.points.iter().enumerate() {
            check_text(&format!("points[{i}].title"), &p.title)?;
            check_text(&format!("points[{i}].description"), &p.description)?;
            check_text(&format!("points[{i}].illustrationPrompt"), &p.illustration_prompt)?;
        }
        Ok(())
    }

    fn render_plan(&self, ctx: &RenderContext<'_>) -> RenderPlan {
        RenderPlan::Illustrations(
            self.points
                .iter()
                .map(|p| prompts::illustration_prompt(&p.illustration_prompt, ctx.style))
                .collect(),
        )
    }

    fn describe(&self) -> String {
        format!("{} key points", self.points.len())
    }
}
