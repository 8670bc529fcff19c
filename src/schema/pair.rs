use super::{check_count, check_text, check_texts, Analysis, RenderContext, RenderPlan};
use crate::error::SchemaViolation;
use crate::prompts;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Details per concept; exactly two.
pub const DETAILS_PER_CONCEPT: usize = 2;

/// A concept headline with exactly two supporting details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDetail {
    /// A short phrase (at most 5 words).
    pub concept: String,
    /// Exactly two short supporting phrases (at most 12 words each).
    #[schemars(length(equal = 2))]
    pub details: Vec<String>,
}

impl ConceptDetail {
    fn validate(&self, field: &str) -> Result<(), SchemaViolation> {
        check_text(&format!("{field}.concept"), &self.concept)?;
        let details = format!("{field}.details");
        check_count(
            &details,
            self.details.len(),
            DETAILS_PER_CONCEPT,
            DETAILS_PER_CONCEPT,
        )?;
        check_texts(&details, &self.details)
    }

    fn content_block(&self, label: &str) -> String {
        let mut block = format!("*   **{label}:**\n    Heading: {}", self.concept.trim());
        for detail in &self.details {
            block.push_str("\n    - ");
            block.push_str(detail.trim());
        }
        block
    }
}

/// Title, two key concepts, and a summary connecting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConceptPair {
    /// A short title (at most 8 words).
    pub title: String,
    #[serde(rename = "keyConceptA")]
    pub key_concept_a: ConceptDetail,
    #[serde(rename = "keyConceptB")]
    pub key_concept_b: ConceptDetail,
    /// One sentence connecting the two concepts.
    pub summary: String,
}

impl Analysis for ConceptPair {
    const NAME: &'static str = "pair";

    fn extraction_instructions() -> &'static str {
        prompts::PAIR_INSTRUCTIONS
    }

    fn validate(&self) -> Result<(), SchemaViolation> {
        check_text("title", &self.title)?;
        check_text("summary", &self.summary)?;
        self.key_concept_a.validate("keyConceptA")?;
        self.key_concept_b.validate("keyConceptB")
    }

    fn render_plan(&self, ctx: &RenderContext<'_>) -> RenderPlan {
        let content = format!(
            "*   **Title:**\n    > {}\n\n{}\n\n{}\n\n*   **Summary:**\n    > {}",
            self.title.trim(),
            self.key_concept_a.content_block("Key Concept A (left panel)"),
            self.key_concept_b.content_block("Key Concept B (right panel)"),
            self.summary.trim()
        );
        RenderPlan::Composite(prompts::composite_prompt(
            prompts::PAIR_LAYOUT,
            &content,
            ctx.style,
            ctx.structure,
        ))
    }

    fn describe(&self) -> String {
        format!(
            "2 key concepts ({} / {})",
            self.key_concept_a.concept, self.key_concept_b.concept
        )
    }
}

/// Title, the two sides of a balancing test, and a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceScale {
    /// A short title naming what is being weighed (at most 8 words).
    pub title: String,
    pub left_scale: ConceptDetail,
    pub right_scale: ConceptDetail,
    /// One sentence on how the balance is struck.
    pub summary: String,
}

impl Analysis for BalanceScale {
    const NAME: &'static str = "scale";

    fn extraction_instructions() -> &'static str {
        prompts::SCALE_INSTRUCTIONS
    }

    fn validate(&self) -> Result<(), SchemaViolation> {
        check_text("title", &self.title)?;
        check_text("summary", &self.summary)?;
        self.left_scale.validate("leftScale")?;
        self.right_scale.validate("rightScale")
    }

    fn render_plan(&self, ctx: &RenderContext<'_>) -> RenderPlan {
        let content = format!(
            "*   **Title:**\n    > {}\n\n{}\n\n{}\n\n*   **Summary:**\n    > {}",
            self.title.trim(),
            self.left_scale.content_block("Left Scale (under the left pan)"),
            self.right_scale.content_block("Right Scale (under the right pan)"),
            self.summary.trim()
        );
        RenderPlan::Composite(prompts::composite_prompt(
            prompts::SCALE_LAYOUT,
            &content,
            ctx.style,
            ctx.structure,
        ))
    }

    fn describe(&self) -> String {
        format!(
            "balance of {} vs {}",
            self.left_scale.concept, self.right_scale.concept
        )
    }
}
