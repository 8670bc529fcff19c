//! Analysis schemas: the contract between the extraction prompt and the
//! JSON the text model must return.
//!
//! Each shape is one implementation of [`Analysis`]. A pipeline is
//! parameterised by exactly one shape, so the prompt, the JSON Schema, the
//! count invariants, and the rendering template always travel together.
//!
//! | Type | Render mode |
//! |------|-------------|
//! | [`IllustratedPoints`] | one text-free illustration per point |
//! | [`ConceptPair`]       | composite, two side-by-side panels |
//! | [`BalanceScale`]      | composite, scales of justice |
//! | [`ConceptClover`]     | composite, four connected circles |
//! | [`ConceptMap`]        | composite, concept grid + relationships |

mod clover;
mod map;
mod pair;
mod points;

pub use clover::{ConceptClover, KeyConcept};
pub use map::ConceptMap;
pub use pair::{BalanceScale, ConceptDetail, ConceptPair};
pub use points::{IllustratedPoints, Point};

use crate::config::Style;
use crate::error::SchemaViolation;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Context the rendering template may use besides the analysis itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext<'a> {
    pub style: Style,
    /// Free-text layout plan from the structure-planning stage.
    pub structure: Option<&'a str>,
}

/// The image calls an analysis asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan {
    /// One independent, text-free illustration per prompt, in order.
    Illustrations(Vec<String>),
    /// A single infographic with all extracted text rendered onto it.
    Composite(String),
}

impl RenderPlan {
    /// Number of image calls this plan issues.
    pub fn image_count(&self) -> usize {
        match self {
            RenderPlan::Illustrations(prompts) => prompts.len(),
            RenderPlan::Composite(_) => 1,
        }
    }
}

/// A validated extraction result shape.
pub trait Analysis:
    Serialize + DeserializeOwned + JsonSchema + Clone + Debug + PartialEq + Send + Sync + 'static
{
    /// Short identifier used in logs and the CLI.
    const NAME: &'static str;

    /// What the model must extract, as a numbered list for the prompt.
    fn extraction_instructions() -> &'static str;

    /// Check every presence and count invariant.
    fn validate(&self) -> Result<(), SchemaViolation>;

    /// Build the image request(s) for this analysis.
    fn render_plan(&self, ctx: &RenderContext<'_>) -> RenderPlan;

    /// One-line description for logs, e.g. `"4 key concepts"`.
    fn describe(&self) -> String;

    /// JSON Schema sent alongside the extraction prompt.
    fn response_schema() -> serde_json::Value {
        let schema = schemars::gen::SchemaSettings::draft07()
            .with(|s| s.inline_subschemas = true)
            .into_generator()
            .into_root_schema_for::<Self>();
        serde_json::to_value(schema).unwrap_or_default()
    }
}

// ── Validation helpers ───────────────────────────────────────────────────

/// Fail unless `min <= actual <= max`.
pub(crate) fn check_count(
    field: &str,
    actual: usize,
    min: usize,
    max: usize,
) -> Result<(), SchemaViolation> {
    if actual < min || actual > max {
        return Err(SchemaViolation::Count {
            field: field.to_string(),
            min,
            max,
            actual,
        });
    }
    Ok(())
}

/// Fail when `value` is empty after trimming.
pub(crate) fn check_text(field: &str, value: &str) -> Result<(), SchemaViolation> {
    if value.trim().is_empty() {
        return Err(SchemaViolation::Blank {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Check every entry of a list of strings, naming the failing index.
pub(crate) fn check_texts(field: &str, values: &[String]) -> Result<(), SchemaViolation> {
    values
        .iter()
        .enumerate()
        .try_for_each(|(i, v)| check_text(&format!("{field}[{i}]"), v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_bounds_are_inclusive() {
        assert!(check_count("points", 3, 3, 6).is_ok());
        assert!(check_count("points", 6, 3, 6).is_ok());
        assert_eq!(
            check_count("points", 7, 3, 6),
            Err(SchemaViolation::Count {
                field: "points".into(),
                min: 3,
                max: 6,
                actual: 7
            })
        );
        assert!(check_count("points", 2, 3, 6).is_err());
    }

    #[test]
    fn blank_strings_are_rejected() {
        assert!(check_text("summary", "  \n ").is_err());
        assert!(check_text("summary", "ok").is_ok());
        let err = check_texts("details", &["a".into(), " ".into()]).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::Blank {
                field: "details[1]".into()
            }
        );
    }

    #[test]
    fn render_plan_counts_calls() {
        assert_eq!(RenderPlan::Composite("p".into()).image_count(), 1);
        assert_eq!(
            RenderPlan::Illustrations(vec!["a".into(), "b".into()]).image_count(),
            2
        );
    }
}
