//! CLI binary for lawgic.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `InfographicConfig`, runs one submission, prints the response, and writes
//! the rendered images to disk.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use lawgic::generate::error_payload;
use lawgic::{
    Analysis, BalanceScale, ConceptClover, ConceptMap, ConceptPair, ErrorPayload,
    IllustratedPoints, InfographicConfig, InfographicPipeline, PipelineProgressCallback,
    ProgressCallback, Stage, Style, Submission, SubmissionResponse, UploadedFile,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner naming the running stage, with one
/// log line per finished stage. Extraction and planning may run at the same
/// time, so the spinner only ever shows the latest stage started.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Generating");
        bar.set_message("Preparing…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl PipelineProgressCallback for CliProgressCallback {
    fn on_stage_start(&self, stage: Stage) {
        self.bar.set_message(format!("{stage}…"));
    }

    fn on_stage_complete(&self, stage: Stage) {
        match stage {
            Stage::Received | Stage::Failed => {}
            Stage::Assembled => self.bar.finish_and_clear(),
            other => self
                .bar
                .println(format!("  {} {}", green("✓"), dim(other.label()))),
        }
    }

    fn on_failed(&self, stage: Stage, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let msg = match error.char_indices().nth(100) {
            Some((cut, _)) => format!("{}\u{2026}", &error[..cut]),
            None => error.to_string(),
        };
        self.bar
            .println(format!("  {} {}  {}", red("✗"), stage.label(), red(&msg)));
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Illustrated key points from a PDF
  lawgic lease.pdf

  # Four-concept clover from pasted text, classic style
  lawgic --layout clover --style classic --text "The tenant shall ..."

  # Composite with a planned layout, images written to ./out
  lawgic --layout scale --plan --out-dir out judgment.docx

  # Full JSON response (images inline as base64)
  lawgic --json --layout map statute.txt > response.json

LAYOUTS:
  points   3–6 key points, one text-free illustration each (default)
  pair     two key concepts in side-by-side panels
  scale    two interests on the scales of justice
  clover   four connected key concepts
  map      2–8 concepts with their relationships

ENVIRONMENT VARIABLES:
  GOOGLE_API_KEY          Google Generative Language API key (required)
  GEMINI_API_KEY          Fallback when GOOGLE_API_KEY is unset
  LAWGIC_TEXT_PROVIDER    edgequake-llm provider for text generation
  LAWGIC_TEXT_MODEL       Text model id
  LAWGIC_IMAGE_MODEL      Image model id
  RUST_LOG                Override log filtering (e.g. lawgic=debug)
"#;

/// Turn legal text into an AI-generated infographic.
#[derive(Parser, Debug)]
#[command(
    name = "lawgic",
    version,
    about = "Turn legal text into an AI-generated infographic",
    long_about = "Read legal text (a PDF, DOCX, or TXT file, or text passed with --text), extract \
its key concepts with a text model, and render them as an infographic with an image model.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF, DOCX, or TXT file to read. Takes precedence over --text.
    input: Option<PathBuf>,

    /// Legal text to use instead of a file.
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Infographic layout.
    #[arg(long, env = "LAWGIC_LAYOUT", value_enum, default_value = "points")]
    layout: LayoutArg,

    /// Art direction for the image model.
    #[arg(long, env = "LAWGIC_STYLE", value_enum, default_value = "modern")]
    style: StyleArg,

    /// Plan a simple layout concurrently with extraction and pass it to the
    /// image model.
    #[arg(long, env = "LAWGIC_PLAN")]
    plan: bool,

    /// Directory the rendered images are written to.
    #[arg(long, env = "LAWGIC_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Print the full JSON response (images inline) on stdout.
    #[arg(long, env = "LAWGIC_JSON")]
    json: bool,

    /// edgequake-llm provider for text generation (gemini, openai, anthropic, ollama, …).
    #[arg(long, env = "LAWGIC_TEXT_PROVIDER", default_value = lawgic::config::DEFAULT_TEXT_PROVIDER)]
    text_provider: String,

    /// Text model id.
    #[arg(long, env = "LAWGIC_TEXT_MODEL", default_value = lawgic::config::DEFAULT_TEXT_MODEL)]
    text_model: String,

    /// Image model id.
    #[arg(long, env = "LAWGIC_IMAGE_MODEL", default_value = lawgic::config::DEFAULT_IMAGE_MODEL)]
    image_model: String,

    /// Google API key.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Per-model-call timeout in seconds.
    #[arg(long, env = "LAWGIC_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Maximum concurrent illustration calls.
    #[arg(short, long, env = "LAWGIC_CONCURRENCY", default_value_t = 6)]
    concurrency: usize,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "LAWGIC_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "LAWGIC_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LayoutArg {
    Points,
    Pair,
    Scale,
    Clover,
    Map,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    Modern,
    Classic,
    Artistic,
}

impl From<StyleArg> for Style {
    fn from(v: StyleArg) -> Self {
        match v {
            StyleArg::Modern => Style::Modern,
            StyleArg::Classic => Style::Classic,
            StyleArg::Artistic => Style::Artistic,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner already reports stage progress, so INFO logs are hidden
    // while it is active.
    let show_progress = !cli.quiet && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn PipelineProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;
    let submission = build_submission(&cli).await?;

    let ok = match cli.layout {
        LayoutArg::Points => generate::<IllustratedPoints>(&cli, config, submission).await?,
        LayoutArg::Pair => generate::<ConceptPair>(&cli, config, submission).await?,
        LayoutArg::Scale => generate::<BalanceScale>(&cli, config, submission).await?,
        LayoutArg::Clover => generate::<ConceptClover>(&cli, config, submission).await?,
        LayoutArg::Map => generate::<ConceptMap>(&cli, config, submission).await?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Run one submission with shape `A`; returns whether it succeeded.
async fn generate<A: Analysis>(
    cli: &Cli,
    config: InfographicConfig,
    submission: Submission,
) -> Result<bool> {
    let response: SubmissionResponse<A> = match InfographicPipeline::<A>::from_config(config) {
        Ok(pipeline) => pipeline.submit(submission).await,
        Err(e) => SubmissionResponse::failure(error_payload(&e)),
    };

    if cli.json {
        let json =
            serde_json::to_string_pretty(&response).context("Failed to serialise response")?;
        println!("{json}");
    }

    if let Some(ref error) = response.error {
        report_error(error);
        return Ok(false);
    }

    if let Some(ref data) = response.data {
        let written = write_images(&cli.out_dir, data.images()).await?;
        if !cli.quiet {
            eprintln!(
                "{} {}  ({})",
                green("✔"),
                bold(&data.analysis().describe()),
                data.style()
            );
            for path in written {
                eprintln!("   {}", path.display());
            }
        }
    }
    Ok(true)
}

fn report_error(error: &ErrorPayload) {
    match error {
        ErrorPayload::Message(msg) => eprintln!("{} {}", red("✘"), msg),
        ErrorPayload::Fields(fields) => {
            for (field, messages) in fields {
                for msg in messages {
                    eprintln!("{} {}: {}", red("✘"), bold(field), msg);
                }
            }
        }
    }
}

/// Decode and write each image as `infographic-<n>.<ext>` (1-based).
async fn write_images(dir: &Path, images: &[lawgic::RenderedImage]) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(images.len());
    for (i, image) in images.iter().enumerate() {
        let bytes = image
            .decode()
            .with_context(|| format!("Image {} has an invalid payload", i + 1))?;
        let path = dir.join(format!("infographic-{}.{}", i + 1, image.extension()));
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Map CLI args to `InfographicConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<InfographicConfig> {
    let mut builder = InfographicConfig::builder()
        .text_provider_name(cli.text_provider.clone())
        .text_model(cli.text_model.clone())
        .image_model(cli.image_model.clone())
        .api_timeout_secs(cli.api_timeout)
        .concurrency(cli.concurrency)
        .plan_structure(cli.plan)
        .style(cli.style.into());

    if let Some(ref key) = cli.api_key {
        builder = builder.api_key(key.clone());
    }
    builder = builder.api_key_from_env();

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

async fn build_submission(cli: &Cli) -> Result<Submission> {
    let file = match cli.input {
        Some(ref path) => Some(
            UploadedFile::from_path(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };
    Ok(Submission {
        text: cli.text.clone(),
        file,
        style: None,
    })
}
