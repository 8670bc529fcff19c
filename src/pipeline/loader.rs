//! Document loading: turn a submission into validated plain text.
//!
//! An uploaded file wins over pasted text. Files are classified by MIME type
//! or extension; PDF and DOCX parsing is CPU-bound and runs on the blocking
//! pool. Whatever the source, the result is normalised to `\n` line endings,
//! trimmed, and checked against the minimum length before any model call.

use crate::config::Style;
use crate::error::ValidationError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, info};

const MIME_PDF: &str = "application/pdf";
const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const MIME_TXT: &str = "text/plain";

/// Where the loaded text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    PlainText,
    Pdf,
    Docx,
}

impl MediaKind {
    /// Classify an upload. Kinds are tried in order (PDF, DOCX, TXT); each
    /// matches on either its MIME type or its extension.
    pub fn classify(name: &str, mime_type: Option<&str>) -> Option<Self> {
        let mime = mime_type
            .and_then(|m| m.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase());
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let is = |want_mime: &str, want_ext: &str| {
            mime.as_deref() == Some(want_mime) || ext.as_deref() == Some(want_ext)
        };

        if is(MIME_PDF, "pdf") {
            Some(MediaKind::Pdf)
        } else if is(MIME_DOCX, "docx") {
            Some(MediaKind::Docx)
        } else if is(MIME_TXT, "txt") {
            Some(MediaKind::PlainText)
        } else {
            None
        }
    }
}

/// A file attached to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            bytes,
        }
    }

    /// Read a local file. The MIME type is left unset so the extension
    /// decides the kind.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, None, bytes))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// An inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub text: Option<String>,
    pub file: Option<UploadedFile>,
    /// Overrides the configured style for this request.
    pub style: Option<Style>,
}

impl Submission {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn from_file(file: UploadedFile) -> Self {
        Self {
            file: Some(file),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

/// Validated plain text ready for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub text: String,
    pub kind: MediaKind,
}

impl SourceDocument {
    /// Length in Unicode scalar values.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Load and validate the submission's text.
pub async fn load(
    submission: &Submission,
    min_chars: usize,
) -> Result<SourceDocument, ValidationError> {
    let (raw, kind) = match submission.file.as_ref().filter(|f| !f.is_empty()) {
        Some(file) => {
            let kind = MediaKind::classify(&file.name, file.mime_type.as_deref()).ok_or_else(
                || ValidationError::UnsupportedFileType {
                    name: file.name.clone(),
                },
            )?;
            debug!("Loading '{}' as {:?} ({} bytes)", file.name, kind, file.bytes.len());
            (read_file(file, kind).await?, kind)
        }
        None => match submission.text.as_deref() {
            Some(text) => (text.to_string(), MediaKind::PlainText),
            None => return Err(ValidationError::MissingInput),
        },
    };

    let text = normalise(&raw);
    let actual = text.chars().count();
    if actual == 0 {
        return Err(ValidationError::MissingInput);
    }
    if actual < min_chars {
        return Err(ValidationError::InputTooShort {
            min: min_chars,
            actual,
        });
    }

    info!("Loaded {} characters ({:?})", actual, kind);
    Ok(SourceDocument { text, kind })
}

async fn read_file(file: &UploadedFile, kind: MediaKind) -> Result<String, ValidationError> {
    let unreadable = |detail: String| ValidationError::UnreadableDocument {
        name: file.name.clone(),
        detail,
    };

    match kind {
        MediaKind::PlainText => Ok(decode_text(&file.bytes)),
        MediaKind::Pdf | MediaKind::Docx => {
            let bytes = file.bytes.clone();
            tokio::task::spawn_blocking(move || match kind {
                MediaKind::Pdf => pdf_text(&bytes),
                _ => docx_text(&bytes),
            })
            .await
            .map_err(|e| unreadable(format!("parser task failed: {e}")))?
            .map_err(unreadable)
        }
    }
}

/// Lossy UTF-8 with the byte-order mark removed.
fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

fn pdf_text(bytes: &[u8]) -> Result<String, String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
}

fn docx_text(bytes: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| e.to_string())?
        .read_to_string(&mut xml)
        .map_err(|e| e.to_string())?;
    document_xml_text(&xml)
}

/// Paragraph text of a WordprocessingML body, one paragraph per line.
fn document_xml_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::with_capacity(xml.len() / 4);
    let mut in_run_text = false;
    let mut in_tab_stops = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"t" => in_run_text = true,
                b"tabs" => in_tab_stops = true,
                b"tab" if !in_tab_stops => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" if !in_tab_stops => out.push('\t'),
                b"br" | b"cr" | b"p" => out.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"tabs" => in_tab_stops = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => {
                out.push_str(&t.unescape().map_err(|e| e.to_string())?);
            }
            Event::CData(t) if in_run_text => {
                out.push_str(&String::from_utf8_lossy(&t));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(out)
}

/// `\r\n` and lone `\r` become `\n`; surrounding whitespace is trimmed.
fn normalise(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}
