use super::{check_count, check_text, check_texts, Analysis, RenderContext, RenderPlan};
use crate::error::SchemaViolation;
use crate::prompts;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const MIN_CONCEPTS: usize = 2;
pub const MAX_CONCEPTS: usize = 8;
pub const MIN_RELATIONSHIPS: usize = 1;
pub const MAX_RELATIONSHIPS: usize = 8;

/// Free-form concept list with relationships and a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConceptMap {
    /// Key legal concepts, each a short phrase.
    #[schemars(length(min = 2, max = 8))]
    pub concepts: Vec<String>,
    /// One sentence per relationship between concepts.
    #[schemars(length(min = 1, max = 8))]
    pub relationships: Vec<String>,
    /// A brief summary of the text.
    pub summary: String,
}

impl Analysis for ConceptMap {
    const NAME: &'static str = "map";

    fn extraction_instructions() -> &'static str {
        prompts::MAP_INSTRUCTIONS
    }

    fn validate(&self) -> Result<(), SchemaViolation> {
        check_text("summary", &self.summary)?;
        check_count("concepts", self.concepts.len(), MIN_CONCEPTS, MAX_CONCEPTS)?;
        check_texts("concepts", &self.concepts)?;
        check_count(
            "relationships",
            self.relationships.len(),
            MIN_RELATIONSHIPS,
            MAX_RELATIONSHIPS,
        )?;
        check_texts("relationships", &self.relationships)
    }

    fn render_plan(&self, ctx: &RenderContext<'_>) -> RenderPlan {
        let numbered = |items: &[String]| {
            items
                .iter()
                .enumerate()
                .map(|(i, s)| format!("    {}. {}", i + 1, s.trim()))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let content = format!(
            "*   **Summary (headline):**\n    > {}\n\n\
             *   **Concepts (one per box):**\n{}\n\n\
             *   **Relationships:**\n{}",
            self.summary.trim(),
            numbered(&self.concepts),
            numbered(&self.relationships)
        );
        RenderPlan::Composite(prompts::composite_prompt(
            prompts::MAP_LAYOUT,
            &content,
            ctx.style,
            ctx.structure,
        ))
    }

    fn describe(&self) -> String {
        format!(
            "{} concepts, {} relationships",
            self.concepts.len(),
            self.relationships.len()
        )
    }
}
