//! Result types handed to the presentation layer.

use crate::config::Style;
use crate::error::{FieldErrors, InfographicError};
use crate::pipeline::encode;
use crate::schema::{Analysis, IllustratedPoints};
use serde::{Deserialize, Serialize};

/// One generated image, carried inline as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedImage {
    pub mime_type: String,
    /// Base64 (standard alphabet) raster bytes.
    pub data: String,
}

impl RenderedImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// `data:<mime>;base64,<data>`, usable directly as an `<img src>`.
    pub fn data_uri(&self) -> String {
        encode::to_data_uri(&self.mime_type, &self.data)
    }

    /// Decode the payload into raw raster bytes.
    pub fn decode(&self) -> Result<Vec<u8>, InfographicError> {
        encode::decode_payload(&self.data)
    }

    /// File extension for the decoded bytes, sniffed from the raster header
    /// and falling back to the declared MIME type.
    pub fn extension(&self) -> &'static str {
        let sniffed = self.decode().ok().and_then(|b| encode::sniff_extension(&b));
        sniffed.unwrap_or_else(|| encode::extension_for_mime(&self.mime_type))
    }
}

/// The assembled infographic: the analysis fields plus the rendered images.
///
/// Built only after every stage succeeds. Serialises with the analysis fields
/// flattened at the top level, next to `images`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "A: Analysis"))]
pub struct InfographicData<A: Analysis> {
    #[serde(flatten)]
    analysis: A,
    images: Vec<RenderedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    structure: Option<String>,
    style: Style,
}

impl<A: Analysis> InfographicData<A> {
    pub(crate) fn new(
        analysis: A,
        images: Vec<RenderedImage>,
        structure: Option<String>,
        style: Style,
    ) -> Self {
        Self {
            analysis,
            images,
            structure,
            style,
        }
    }

    pub fn analysis(&self) -> &A {
        &self.analysis
    }

    pub fn images(&self) -> &[RenderedImage] {
        &self.images
    }

    /// The layout plan, when the structure-planning stage ran.
    pub fn structure(&self) -> Option<&str> {
        self.structure.as_deref()
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

/// One point of an [`IllustratedPoints`] analysis with its illustration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IllustratedPoint {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

impl InfographicData<IllustratedPoints> {
    /// Pair every point with its illustration, in order.
    pub fn illustrated_points(&self) -> Vec<IllustratedPoint> {
        self.analysis
            .points
            .iter()
            .zip(&self.images)
            .map(|(point, image)| IllustratedPoint {
                title: point.title.clone(),
                description: point.description.clone(),
                image_url: image.data_uri(),
            })
            .collect()
    }
}

/// Error half of a [`SubmissionResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    /// Field name → validation messages.
    Fields(FieldErrors),
    /// A single user-facing message.
    Message(String),
}

/// What the presentation layer receives: exactly one of `data` / `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Analysis"))]
pub struct SubmissionResponse<A: Analysis> {
    pub data: Option<InfographicData<A>>,
    pub error: Option<ErrorPayload>,
}

impl<A: Analysis> SubmissionResponse<A> {
    pub fn success(data: InfographicData<A>) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: ErrorPayload) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }
}
