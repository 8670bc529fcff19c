use super::{check_count, check_text, Analysis, RenderContext, RenderPlan};
use crate::error::SchemaViolation;
use crate::prompts;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const KEY_CONCEPTS: usize = 4;

/// Summary headline, exactly four key concepts, and how they relate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConceptClover {
    /// One-sentence summary; rendered as the headline.
    pub summary: String,
    /// Exactly four key concepts.
    #[schemars(length(equal = 4))]
    pub key_concepts: Vec<KeyConcept>,
    /// A short paragraph explaining how the concepts connect.
    pub relationships: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyConcept {
    /// A short phrase (at most 4 words).
    pub concept: String,
    /// One short sentence.
    pub description: String,
    /// One or two words naming a simple line-art icon.
    pub icon: String,
}

impl Analysis for ConceptClover {
    const NAME: &'static str = "clover";

    fn extraction_instructions() -> &'static str {
        prompts::CLOVER_INSTRUCTIONS
    }

    fn validate(&self) -> Result<(), SchemaViolation> {
        check_text("summary", &self.summary)?;
        check_count("keyConcepts", self.key_concepts.len(), KEY_CONCEPTS, KEY_CONCEPTS)?;
        for (i, k) in self.key_concepts.iter().enumerate() {
            check_text(&format!("keyConcepts[{i}].concept"), &k.concept)?;
            check_text(&format!("keyConcepts[{i}].description"), &k.description)?;
            check_text(&format!("keyConcepts[{i}].icon"), &k.icon)?;
        }
        check_text("relationships", &self.relationships)
    }

    fn render_plan(&self, ctx: &RenderContext<'_>) -> RenderPlan {
        let concepts = self
            .key_concepts
            .iter()
            .enumerate()
            .map(|(i, k)| {
                format!(
                    "    {}. Circle text: {}\n       Description: {}\n       Icon: {}",
                    i + 1,
                    k.concept.trim(),
                    k.description.trim(),
                    k.icon.trim()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let content = format!(
            "*   **Summary (main title):**\n    > {}\n\n\
             *   **Key Concepts (for the four circles):**\n{concepts}\n\n\
             *   **Relationships:**\n    > {}",
            self.summary.trim(),
            self.relationships.trim()
        );
        RenderPlan::Composite(prompts::composite_prompt(
            prompts::CLOVER_LAYOUT,
            &content,
            ctx.style,
            ctx.structure,
        ))
    }

    fn describe(&self) -> String {
        format!("{} key concepts", self.key_concepts.len())
    }
}
