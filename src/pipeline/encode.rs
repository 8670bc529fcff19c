//! Image payload codec: base64 ⇄ bytes, `data:` URIs, raster sniffing.
//!
//! The image model returns rasters as base64 strings with a declared MIME
//! type. The presentation layer wants `data:` URIs and the CLI wants files
//! with a sensible extension, so both directions live here.

use crate::error::InfographicError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;

/// `data:<mime>;base64,<data>`.
pub fn to_data_uri(mime_type: &str, data: &str) -> String {
    format!("data:{mime_type};base64,{data}")
}

/// Decode a base64 payload, accepting a full `data:` URI as well.
pub fn decode_payload(data: &str) -> Result<Vec<u8>, InfographicError> {
    let body = match data.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, b)| b).unwrap_or(rest),
        None => data,
    };
    let body: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(body.as_bytes())
        .map_err(|e| InfographicError::Unexpected(format!("invalid base64 image payload: {e}")))
}

/// File extension for a raster, from its magic bytes.
pub fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        ImageFormat::Png => Some("png"),
        ImageFormat::Jpeg => Some("jpg"),
        ImageFormat::WebP => Some("webp"),
        ImageFormat::Gif => Some("gif"),
        _ => None,
    }
}

/// File extension for a declared MIME type; `"bin"` when unknown.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type.trim().to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    }
}
