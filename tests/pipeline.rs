//! Orchestration tests over scripted model clients.
//!
//! No network: both seams are replaced by mocks that count their calls, so
//! each test can assert not only the outcome but how many paid calls a
//! request would have made.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lawgic::error::{FIELD_FILE, FIELD_TEXT};
use lawgic::{
    Analysis, ConceptClover, ConceptMap, ConceptPair, ErrorKind, ErrorPayload, IllustratedPoints,
    ImageModel, InfographicConfig, InfographicError, InfographicPipeline, ModelError,
    PipelineProgressCallback, RenderedImage, Stage, Style, Submission, TextModel, TextRequest,
    UploadedFile, ValidationError,
};
use serde_json::json;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ── Mocks ────────────────────────────────────────────────────────────────────

/// Answers structured requests with `extraction` and free-text requests with
/// `plan`.
struct MockText {
    extraction: Result<String, ModelError>,
    plan: String,
    hang: bool,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockText {
    fn replying(extraction: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            extraction: Ok(extraction.into()),
            plan: "Two columns, one icon each.".to_string(),
            hang: false,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn with_plan(extraction: impl Into<String>, plan: &str) -> Arc<Self> {
        Arc::new(Self {
            extraction: Ok(extraction.into()),
            plan: plan.to_string(),
            hang: false,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(err: ModelError) -> Arc<Self> {
        Arc::new(Self {
            extraction: Err(err),
            plan: String::new(),
            hang: false,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn hanging() -> Arc<Self> {
        Arc::new(Self {
            extraction: Ok(String::new()),
            plan: String::new(),
            hang: true,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextModel for MockText {
    async fn generate(&self, request: &TextRequest) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());
        if self.hang {
            std::future::pending::<()>().await;
        }
        if request.response_schema.is_some() {
            self.extraction.clone()
        } else {
            Ok(self.plan.clone())
        }
    }
}

/// Returns the prompt itself, base64-encoded, as a PNG-typed image.
///
/// Prompts containing `FAIL` error out, prompts containing `EMPTY` get a
/// reply with no image, and prompts containing `SLOW` are delayed.
#[derive(Default)]
struct MockImage {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockImage {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageModel for MockImage {
    async fn generate_image(&self, prompt: &str) -> Result<Option<RenderedImage>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if prompt.contains("SLOW") {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        if prompt.contains("FAIL") {
            return Err(ModelError::Http {
                status: 500,
                body: "internal".into(),
            });
        }
        if prompt.contains("EMPTY") {
            return Ok(None);
        }
        Ok(Some(RenderedImage::new("image/png", STANDARD.encode(prompt))))
    }
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl PipelineProgressCallback for Recorder {
    fn on_stage_start(&self, stage: Stage) {
        self.events.lock().unwrap().push(format!("start {stage:?}"));
    }
    fn on_stage_complete(&self, stage: Stage) {
        self.events.lock().unwrap().push(format!("done {stage:?}"));
    }
    fn on_failed(&self, stage: Stage, _error: &str) {
        self.events.lock().unwrap().push(format!("failed {stage:?}"));
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

const LEGAL_TEXT: &str = "A landlord must give a tenant at least thirty days' written notice \
before terminating a periodic tenancy, and the notice must state the termination date.";

fn config() -> InfographicConfig {
    InfographicConfig::builder()
        .api_key("test-key")
        .api_timeout_secs(5)
        .build()
        .unwrap()
}

fn pipeline<A: Analysis>(
    config: InfographicConfig,
    text: &Arc<MockText>,
    image: &Arc<MockImage>,
) -> InfographicPipeline<A> {
    InfographicPipeline::new(
        config,
        Arc::clone(text) as Arc<dyn TextModel>,
        Arc::clone(image) as Arc<dyn ImageModel>,
    )
}

fn points_json(subjects: &[&str]) -> String {
    json!({
        "title": "Ending a periodic tenancy",
        "points": subjects
            .iter()
            .enumerate()
            .map(|(i, s)| json!({
                "title": format!("Point {i}"),
                "description": format!("Explanation {i}."),
                "illustrationPrompt": s,
            }))
            .collect::<Vec<_>>(),
        "summary": "Notice must be written and dated."
    })
    .to_string()
}

fn clover_json(n: usize) -> String {
    json!({
        "summary": "Valid notice has four elements.",
        "keyConcepts": (0..n)
            .map(|i| json!({"concept": format!("Element {i}"), "description": "Required.", "icon": "calendar"}))
            .collect::<Vec<_>>(),
        "relationships": "All four must be present for the notice to be valid."
    })
    .to_string()
}

fn pair_json() -> String {
    json!({
        "title": "Notice and termination",
        "keyConceptA": {"concept": "Written notice", "details": ["At least thirty days", "Given to the tenant"]},
        "keyConceptB": {"concept": "Termination date", "details": ["Stated in the notice", "Ends the tenancy"]},
        "summary": "Proper notice fixes the termination date."
    })
    .to_string()
}

fn map_json() -> String {
    json!({
        "concepts": ["Notice", "Tenancy"],
        "relationships": ["Notice ends the tenancy."],
        "summary": "Notice ends a periodic tenancy."
    })
    .to_string()
}

// ── Credentials ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_key_fails_before_any_model_call() {
    for key in [None, Some("   "), Some("YOUR_API_KEY_HERE")] {
        let mut builder = InfographicConfig::builder();
        if let Some(k) = key {
            builder = builder.api_key(k);
        }
        let text = MockText::replying(clover_json(4));
        let image = MockImage::new();
        let p = pipeline::<ConceptClover>(builder.build().unwrap(), &text, &image);

        let err = p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigurationError, "key = {key:?}");
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
        assert_eq!(text.calls(), 0);
        assert_eq!(image.calls(), 0);
    }
}

#[test]
fn from_config_without_key_is_a_configuration_error() {
    let err = InfographicPipeline::<ConceptPair>::from_config(InfographicConfig::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigurationError);
}

#[test]
fn explicit_key_is_enough_without_env() {
    std::env::remove_var("GOOGLE_API_KEY");
    std::env::remove_var("GEMINI_API_KEY");
    let config = InfographicConfig::builder()
        .api_key("explicit-key")
        .build()
        .unwrap();
    let p = InfographicPipeline::<ConceptMap>::from_config(config);
    assert!(p.is_ok(), "{:?}", p.err());
}

// ── Input validation ─────────────────────────────────────────────────────────

#[tokio::test]
async fn forty_nine_chars_rejected_fifty_accepted() {
    let text = MockText::replying(map_json());
    let image = MockImage::new();
    let p = pipeline::<ConceptMap>(config(), &text, &image);

    let response = p.submit(Submission::from_text("a".repeat(49))).await;
    assert!(response.data.is_none());
    match response.error {
        Some(ErrorPayload::Fields(fields)) => assert_eq!(
            fields[FIELD_TEXT],
            vec!["Provided text or file content must be at least 50 characters."]
        ),
        other => panic!("expected field errors, got {other:?}"),
    }
    assert_eq!(text.calls(), 0);
    assert_eq!(image.calls(), 0);

    let response = p.submit(Submission::from_text("a".repeat(50))).await;
    assert!(response.is_success(), "{:?}", response.error);
    assert_eq!(text.calls(), 1);
    assert_eq!(image.calls(), 1);
}

#[tokio::test]
async fn missing_input_names_the_text_field() {
    let text = MockText::replying(map_json());
    let image = MockImage::new();
    let p = pipeline::<ConceptMap>(config(), &text, &image);

    let response = p.submit(Submission::default()).await;
    match response.error {
        Some(ErrorPayload::Fields(fields)) => assert_eq!(
            fields[FIELD_TEXT],
            vec!["Please paste text or upload a file to continue."]
        ),
        other => panic!("expected field errors, got {other:?}"),
    }
    assert_eq!(text.calls(), 0);
}

#[tokio::test]
async fn unsupported_file_type_names_the_file_field() {
    let text = MockText::replying(map_json());
    let image = MockImage::new();
    let p = pipeline::<ConceptMap>(config(), &text, &image);

    let file = UploadedFile::new("scan.png", Some("image/png".into()), vec![0x89, b'P', b'N', b'G']);
    let err = p.run(Submission::from_file(file.clone())).await.unwrap_err();
    assert!(matches!(
        err,
        InfographicError::Validation(ValidationError::UnsupportedFileType { .. })
    ));

    let response = p.submit(Submission::from_file(file)).await;
    match response.error {
        Some(ErrorPayload::Fields(fields)) => assert!(fields.contains_key(FIELD_FILE)),
        other => panic!("expected field errors, got {other:?}"),
    }
    assert_eq!(text.calls(), 0);
}

// ── File loading ─────────────────────────────────────────────────────────────

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut buf = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buf);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buf.into_inner()
}

#[tokio::test]
async fn docx_upload_feeds_extraction() {
    let text = MockText::replying(map_json());
    let image = MockImage::new();
    let p = pipeline::<ConceptMap>(config(), &text, &image);

    let bytes = docx_bytes(&[
        "Section 4. Notice to quit.",
        "The landlord must give thirty days' written notice before termination.",
    ]);
    let file = UploadedFile::new("lease.docx", None, bytes);
    let data = p.run(Submission::from_file(file)).await.unwrap();
    assert_eq!(data.analysis().concepts.len(), 2);

    let prompts = text.prompts.lock().unwrap();
    assert!(prompts[0].contains(
        "Section 4. Notice to quit.\nThe landlord must give thirty days' written notice"
    ));
}

#[tokio::test]
async fn txt_file_from_disk_wins_over_pasted_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clause.TXT");
    std::fs::write(&path, format!("\u{feff}{LEGAL_TEXT}\r\n")).unwrap();

    let file = UploadedFile::from_path(&path).await.unwrap();
    assert_eq!(file.name, "clause.TXT");
    assert!(file.mime_type.is_none());

    let text = MockText::replying(map_json());
    let image = MockImage::new();
    let p = pipeline::<ConceptMap>(config(), &text, &image);

    let submission = Submission {
        text: Some("this pasted text is ignored because a file was uploaded".into()),
        file: Some(file),
        style: None,
    };
    p.run(submission).await.unwrap();

    let prompts = text.prompts.lock().unwrap();
    assert!(prompts[0].contains(LEGAL_TEXT));
    assert!(!prompts[0].contains("ignored"));
    assert!(!prompts[0].contains('\u{feff}'));
}

#[tokio::test]
async fn unparseable_pdf_is_a_validation_error() {
    let text = MockText::replying(map_json());
    let image = MockImage::new();
    let p = pipeline::<ConceptMap>(config(), &text, &image);

    let file = UploadedFile::new("lease.pdf", Some("application/pdf".into()), b"%PDF-garbage".to_vec());
    let err = p.run(Submission::from_file(file)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationError);
    assert_eq!(text.calls(), 0);
}

// ── Extraction ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn clover_with_three_concepts_fails_without_image_calls() {
    let text = MockText::replying(clover_json(3));
    let image = MockImage::new();
    let p = pipeline::<ConceptClover>(config(), &text, &image);

    let err = p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExtractionFailure);
    assert!(err.to_string().contains("keyConcepts"));
    assert_eq!(text.calls(), 1);
    assert_eq!(image.calls(), 0);
}

#[tokio::test]
async fn malformed_json_is_an_extraction_failure() {
    let text = MockText::replying("Sorry, I can't produce JSON today.");
    let image = MockImage::new();
    let p = pipeline::<ConceptPair>(config(), &text, &image);

    let err = p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExtractionFailure);
    assert_eq!(image.calls(), 0);
}

#[tokio::test]
async fn text_model_error_is_an_extraction_failure() {
    let text = MockText::failing(ModelError::Http {
        status: 503,
        body: "overloaded".into(),
    });
    let image = MockImage::new();
    let p = pipeline::<ConceptPair>(config(), &text, &image);

    let response = p.submit(Submission::from_text(LEGAL_TEXT)).await;
    match response.error {
        Some(ErrorPayload::Message(msg)) => assert!(msg.contains("503"), "{msg}"),
        other => panic!("expected message, got {other:?}"),
    }
    assert_eq!(text.calls(), 1, "no retry");
}

#[tokio::test]
async fn hanging_text_model_times_out() {
    let text = MockText::hanging();
    let image = MockImage::new();
    let config = InfographicConfig::builder()
        .api_key("test-key")
        .api_timeout_secs(1)
        .build()
        .unwrap();
    let p = pipeline::<ConceptPair>(config, &text, &image);

    let err = p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(matches!(
        err,
        InfographicError::Timeout {
            stage: Stage::Extracted,
            secs: 1
        }
    ));
    assert_eq!(image.calls(), 0);
}

// ── Rendering ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn illustrations_keep_point_order() {
    let text = MockText::replying(points_json(&["SLOW gavel", "a key", "a calendar", "a house"]));
    let image = MockImage::new();
    let p = pipeline::<IllustratedPoints>(config(), &text, &image);

    let data = p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap();
    assert_eq!(data.images().len(), 4);
    assert_eq!(image.calls(), 4);

    let subjects = ["SLOW gavel", "a key", "a calendar", "a house"];
    for (img, subject) in data.images().iter().zip(subjects) {
        let prompt = String::from_utf8(img.decode().unwrap()).unwrap();
        assert!(prompt.contains(&format!("\"{subject}\"")), "{prompt}");
        assert!(prompt.contains("DO NOT include any text"));
    }

    let points = data.illustrated_points();
    assert_eq!(points.len(), 4);
    assert_eq!(points[1].title, "Point 1");
    assert!(points[1].image_url.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn one_failed_illustration_fails_the_request() {
    let text = MockText::replying(points_json(&["a gavel", "a key", "FAIL calendar", "a house"]));
    let image = MockImage::new();
    let p = pipeline::<IllustratedPoints>(config(), &text, &image);

    let err = p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ImageGenerationFailed);
    assert!(matches!(
        err,
        InfographicError::ImageGeneration { index: Some(2), .. }
    ));
    assert!(err.to_string().contains("illustration 3"));
}

#[tokio::test]
async fn composite_without_image_payload_has_no_data() {
    let reply = json!({
        "title": "EMPTY reply case",
        "keyConceptA": {"concept": "A", "details": ["a1", "a2"]},
        "keyConceptB": {"concept": "B", "details": ["b1", "b2"]},
        "summary": "Summary."
    })
    .to_string();
    let text = MockText::replying(reply);
    let image = MockImage::new();
    let p = pipeline::<ConceptPair>(config(), &text, &image);

    let response = p.submit(Submission::from_text(LEGAL_TEXT)).await;
    assert!(response.data.is_none());
    match &response.error {
        Some(ErrorPayload::Message(msg)) => assert!(msg.starts_with("Image generation failed")),
        other => panic!("expected message, got {other:?}"),
    }
    assert_eq!(image.calls(), 1);

    let value = serde_json::to_value(&response).unwrap();
    assert!(value["data"].is_null());
}

#[tokio::test]
async fn composite_prompt_carries_every_string_and_style() {
    let text = MockText::replying(pair_json());
    let image = MockImage::new();
    let p = pipeline::<ConceptPair>(config(), &text, &image);

    let data = p
        .run(Submission::from_text(LEGAL_TEXT).with_style(Style::Artistic))
        .await
        .unwrap();
    assert_eq!(data.images().len(), 1);
    assert_eq!(data.style(), Style::Artistic);
    assert!(data.structure().is_none());

    let prompts = image.prompts.lock().unwrap();
    for s in [
        "Notice and termination",
        "Written notice",
        "At least thirty days",
        "Ends the tenancy",
        "Proper notice fixes the termination date.",
        Style::Artistic.direction(),
        "PERFECT TEXT LEGIBILITY",
    ] {
        assert!(prompts[0].contains(s), "missing {s}");
    }
}

// ── Structure planning ───────────────────────────────────────────────────────

#[tokio::test]
async fn planned_structure_reaches_the_composite_prompt() {
    let text = MockText::with_plan(clover_json(4), "Headline on top, four circles below.");
    let image = MockImage::new();
    let config = InfographicConfig::builder()
        .api_key("test-key")
        .plan_structure(true)
        .build()
        .unwrap();
    let p = pipeline::<ConceptClover>(config, &text, &image);

    let data = p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap();
    assert_eq!(text.calls(), 2);
    assert_eq!(data.structure(), Some("Headline on top, four circles below."));
    assert!(image.prompts.lock().unwrap()[0].contains("Headline on top, four circles below."));
}

#[tokio::test]
async fn empty_plan_fails_the_request() {
    let text = MockText::with_plan(clover_json(4), "  \n ");
    let image = MockImage::new();
    let config = InfographicConfig::builder()
        .api_key("test-key")
        .plan_structure(true)
        .build()
        .unwrap();
    let p = pipeline::<ConceptClover>(config, &text, &image);

    let err = p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExtractionFailure);
    assert_eq!(image.calls(), 0);
}

/// Each call signals the other and then waits for the other's signal, so
/// the pair only completes when both calls are in flight at once.
struct RendezvousText {
    extraction_started: tokio::sync::Notify,
    planning_started: tokio::sync::Notify,
}

#[async_trait]
impl TextModel for RendezvousText {
    async fn generate(&self, request: &TextRequest) -> Result<String, ModelError> {
        if request.response_schema.is_some() {
            self.extraction_started.notify_one();
            self.planning_started.notified().await;
            Ok(clover_json(4))
        } else {
            self.planning_started.notify_one();
            self.extraction_started.notified().await;
            Ok("Four circles around a headline.".to_string())
        }
    }
}

#[tokio::test]
async fn planning_overlaps_extraction() {
    let text = Arc::new(RendezvousText {
        extraction_started: tokio::sync::Notify::new(),
        planning_started: tokio::sync::Notify::new(),
    });
    let image = MockImage::new();
    let config = InfographicConfig::builder()
        .api_key("test-key")
        .api_timeout_secs(5)
        .plan_structure(true)
        .build()
        .unwrap();
    let p = InfographicPipeline::<ConceptClover>::new(
        config,
        text as Arc<dyn TextModel>,
        Arc::clone(&image) as Arc<dyn ImageModel>,
    );

    let data = tokio::time::timeout(
        Duration::from_secs(1),
        p.run(Submission::from_text(LEGAL_TEXT)),
    )
    .await
    .expect("extraction and planning ran one after the other")
    .unwrap();
    assert_eq!(data.structure(), Some("Four circles around a headline."));
    assert_eq!(image.calls(), 1);
}

// ── Orchestration ────────────────────────────────────────────────────────────

#[tokio::test]
async fn fixed_mocks_give_identical_results() {
    let text = MockText::replying(points_json(&["a gavel", "a key", "a house"]));
    let image = MockImage::new();
    let p = pipeline::<IllustratedPoints>(config(), &text, &image);

    let first = p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap();
    let second = p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn progress_events_follow_the_stage_order() {
    let recorder = Arc::new(Recorder::default());
    let config = InfographicConfig::builder()
        .api_key("test-key")
        .progress_callback(Arc::clone(&recorder) as Arc<dyn PipelineProgressCallback>)
        .build()
        .unwrap();
    let text = MockText::replying(map_json());
    let image = MockImage::new();
    let p = pipeline::<ConceptMap>(config, &text, &image);

    p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap();
    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "done Received",
            "start Loaded",
            "done Loaded",
            "start Extracted",
            "done Extracted",
            "start Rendered",
            "done Rendered",
            "done Assembled",
        ]
    );
}

#[tokio::test]
async fn failure_is_reported_to_the_callback() {
    let recorder = Arc::new(Recorder::default());
    let config = InfographicConfig::builder()
        .api_key("test-key")
        .progress_callback(Arc::clone(&recorder) as Arc<dyn PipelineProgressCallback>)
        .build()
        .unwrap();
    let text = MockText::replying(clover_json(5));
    let image = MockImage::new();
    let p = pipeline::<ConceptClover>(config, &text, &image);

    p.run(Submission::from_text(LEGAL_TEXT)).await.unwrap_err();
    let events = recorder.events.lock().unwrap().clone();
    assert!(events.contains(&"failed Extracted".to_string()));
    assert_eq!(events.last().map(String::as_str), Some("done Failed"));
    assert!(!events.iter().any(|e| e.ends_with("Rendered")));
}

#[tokio::test]
async fn success_response_serialises_flat() {
    let text = MockText::replying(map_json());
    let image = MockImage::new();
    let p = pipeline::<ConceptMap>(config(), &text, &image);

    let response = p.submit(Submission::from_text(LEGAL_TEXT)).await;
    let value = serde_json::to_value(&response).unwrap();
    assert!(value["error"].is_null());
    assert_eq!(value["data"]["concepts"][0], "Notice");
    assert_eq!(value["data"]["style"], "modern");
    assert_eq!(value["data"]["images"][0]["mimeType"], "image/png");
}
