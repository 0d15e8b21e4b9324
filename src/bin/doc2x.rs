//! CLI binary for doc2x.
//!
//! A thin shim over the library crate that maps CLI flags to an
//! `UploadStore` + `ConvertClient` and writes results to disk or stdout.

use anyhow::{bail, Context, Result};
use clap::Parser;
use doc2x::{
    batch_operations, human_size, render_flashcards_txt, single_operations, ClientConfig,
    ConversionResult, ConvertClient, Operation, ProgressCallback, RequestProgressCallback,
    SelectedFile, SelectionMode, UploadStore,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
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
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress: an honest spinner while the single request is in
/// flight. The backend reports nothing until it answers, so there is no
/// percentage to show and none is invented.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl RequestProgressCallback for CliProgressCallback {
    fn on_request_start(&self, operation: &str, files: usize, total_bytes: usize) {
        self.bar.set_message(format!(
            "{operation}  ({files} file{}, {})",
            if files == 1 { "" } else { "s" },
            human_size(total_bytes)
        ));
    }

    fn on_request_complete(&self, operation: &str, result_bytes: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {}  {}",
            green("✔"),
            bold(operation),
            dim(&human_size(result_bytes))
        );
    }

    fn on_request_error(&self, operation: &str, error: &str) {
        self.bar.finish_and_clear();
        // Truncate very long error messages to keep output tidy.
        let msg = if error.len() > 120 {
            format!("{}\u{2026}", &error[..119])
        } else {
            error.to_string()
        };
        eprintln!("{} {}  {}", red("✗"), bold(operation), red(&msg));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a PDF to Word (first operation is the default)
  doc2x report.pdf

  # Pick an operation explicitly
  doc2x --operation pdf-to-text report.pdf

  # Compress an image at quality 60
  doc2x --operation image-compress --compression-level 60 photo.jpg

  # Password-protect a PDF
  doc2x --operation pdf-protect --password hunter2 report.pdf -o protected.pdf

  # Merge several PDFs (multiple inputs switch to batch mode)
  doc2x a.pdf b.pdf c.pdf --operation merge-pdfs -o merged.pdf

  # Split a PDF into page ranges
  doc2x book.pdf --batch --operation split-pdf --split-ranges 1-3,7,9-12

  # What can be done with this file? (no network)
  doc2x --list-operations notes.docx

  # Generate flashcards from a PDF
  doc2x --flashcards lecture.pdf -o deck.txt

OPERATIONS BY FORMAT:
  Format       Single operations
  ─────────    ────────────────────────────────────────────────────────
  pdf          pdf-to-docx pdf-to-xlsx pdf-to-pptx pdf-to-jpg pdf-to-text
               pdf-compress pdf-protect pdf-unlock pdf-ocr
  word         docx-to-pdf
  excel        xlsx-to-pdf
  powerpoint   pptx-to-pdf
  jpg          jpg-to-png jpg-to-pdf image-to-text image-compress
  png          png-to-jpg png-to-pdf image-to-text image-compress
  gif          image-to-text
  text         text-to-pdf

  Format       Batch operations
  ─────────    ────────────────────────────────────────────────────────
  pdf          merge-pdfs split-pdf batch-compress
  jpg/png/gif  batch-compress-images batch-convert-to-pdf

ENVIRONMENT VARIABLES:
  DOC2X_API_URL      Conversion service origin (default http://localhost:8000)
  DOC2X_AUTH_TOKEN   Bearer token for the infographic endpoint
  DOC2X_TIMEOUT      Whole-request timeout in seconds (default 120)

SETUP:
  1. Start the conversion service (or point DOC2X_API_URL at one).
  2. Convert:  doc2x document.pdf -o output.docx
"#;

/// Convert, compress, and secure documents via a conversion service.
#[derive(Parser, Debug)]
#[command(
    name = "doc2x",
    version,
    about = "Convert, compress, and secure documents via a conversion service",
    long_about = "Send documents to a conversion service: format conversion, compression, OCR, \
merge/split, password protection, and flashcard generation. The service does the heavy \
lifting; doc2x handles format detection, operation selection, and the upload lifecycle.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input file(s). More than one switches to batch mode.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write the result to this file instead of the inferred name.
    #[arg(short, long, env = "DOC2X_OUTPUT")]
    output: Option<PathBuf>,

    /// Operation identifier (e.g. pdf-to-docx, image-compress).
    /// Defaults to the first operation the input's format unlocks.
    #[arg(long, env = "DOC2X_OPERATION")]
    operation: Option<String>,

    /// Treat the input(s) as a batch selection even when only one file
    /// is given (enables merge-pdfs, split-pdf, batch-*).
    #[arg(long)]
    batch: bool,

    /// Print the operations available for the input(s) and exit. No
    /// network access.
    #[arg(long)]
    list_operations: bool,

    /// Compression quality, 10–100 (compression operations only).
    #[arg(long, env = "DOC2X_COMPRESSION_LEVEL",
          value_parser = clap::value_parser!(u8).range(10..=100))]
    compression_level: Option<u8>,

    /// Password for pdf-protect / pdf-unlock.
    #[arg(long, env = "DOC2X_PASSWORD")]
    password: Option<String>,

    /// Page ranges for split-pdf, e.g. 1-3,7,9-12.
    #[arg(long)]
    split_ranges: Option<String>,

    /// Generate flashcards from a PDF instead of converting.
    #[arg(long, conflicts_with_all = ["infographic", "operation", "batch"])]
    flashcards: bool,

    /// Generate an infographic from a PDF (requires an auth token).
    #[arg(long, conflicts_with_all = ["operation", "batch"])]
    infographic: bool,

    /// Conversion service origin.
    #[arg(long, env = "DOC2X_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Bearer token for the infographic endpoint.
    #[arg(long, env = "DOC2X_AUTH_TOKEN")]
    auth_token: Option<String>,

    /// Whole-request timeout in seconds.
    #[arg(long, env = "DOC2X_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Output a JSON summary instead of human-readable text.
    #[arg(long, env = "DOC2X_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "DOC2X_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOC2X_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long, env = "DOC2X_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────
    // Library INFO logs duplicate what the spinner shows; keep them at
    // error level unless the user asked for more.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
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

    // ── Load inputs ──────────────────────────────────────────────────
    let mut files = Vec::with_capacity(cli.inputs.len());
    for path in &cli.inputs {
        files.push(
            SelectedFile::from_path(path)
                .with_context(|| format!("Failed to read input '{}'", path.display()))?,
        );
    }

    // ── List-operations mode (offline) ───────────────────────────────
    if cli.list_operations {
        list_operations(&files);
        return Ok(());
    }

    // ── Build client ─────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress && !cli.flashcards {
        Some(CliProgressCallback::new() as Arc<dyn RequestProgressCallback>)
    } else {
        None
    };

    let mut builder = ClientConfig::builder()
        .base_url(cli.api_url.as_str())
        .request_timeout_secs(cli.timeout);
    if let Some(ref token) = cli.auth_token {
        builder = builder.auth_token(token.as_str());
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;
    let client = ConvertClient::new(config).context("Failed to build HTTP client")?;

    // ── Flashcards / infographic modes ───────────────────────────────
    if cli.flashcards {
        return run_flashcards(&cli, &client, &files).await;
    }
    if cli.infographic {
        return run_infographic(&cli, &client, &files).await;
    }

    // ── Conversion ───────────────────────────────────────────────────
    run_convert(&cli, &client, files).await
}

/// Print the single and batch operations each input unlocks.
fn list_operations(files: &[SelectedFile]) {
    for file in files {
        let format = file.format();
        println!(
            "{}  {}  {}",
            bold(file.name()),
            dim(&format.to_string()),
            dim(&human_size(file.size()))
        );

        let single = single_operations(format);
        if single.is_empty() {
            println!("  {}", red("no operations available"));
        } else {
            for op in single {
                println!("  {:<24} {}", op.identifier(), dim(op.label()));
            }
        }

        let batch = batch_operations(format);
        if !batch.is_empty() {
            println!("  {}", cyan("batch:"));
            for op in batch {
                println!("  {:<24} {}", op.identifier(), dim(op.label()));
            }
        }
        println!();
    }
}

/// Map CLI args onto a store and run one conversion.
async fn run_convert(cli: &Cli, client: &ConvertClient, files: Vec<SelectedFile>) -> Result<()> {
    let batch_mode = cli.batch || files.len() > 1;
    let mut store = UploadStore::new();

    if batch_mode {
        store.set_mode(SelectionMode::Batch);
        store.set_batch_files(files);
    } else {
        let file = files.into_iter().next().expect("at least one input");
        if let Err(e) = store.set_file(file) {
            // Unsupported format: nothing this file can do.
            bail!("{e}");
        }
    }

    if let Some(ref id) = cli.operation {
        let op = Operation::from_identifier(id)
            .with_context(|| format!("Unknown operation '{id}' — see --list-operations"))?;
        store
            .select_operation(op)
            .context("Operation not available for this selection")?;
    }
    if store.selected_operation().is_none() {
        bail!("No operation available for this selection — see --list-operations");
    }

    if let Some(level) = cli.compression_level {
        store.set_compression_level(level);
    }
    if let Some(ref pw) = cli.password {
        store.set_password(pw.clone());
    }
    if let Some(ref ranges) = cli.split_ranges {
        store.set_split_ranges(ranges.clone());
    }

    client
        .submit(&mut store)
        .await
        .context("Conversion failed")?;

    let result = store
        .result()
        .context("Conversion reported success but no result is present")?;
    write_result(cli, result)
}

/// Write the conversion result to disk or stdout.
fn write_result(cli: &Cli, result: &ConversionResult) -> Result<()> {
    match result {
        ConversionResult::Text(text) => {
            if let Some(ref path) = cli.output {
                std::fs::write(path, text)
                    .with_context(|| format!("Failed to write '{}'", path.display()))?;
                if !cli.quiet {
                    eprintln!("{} {}", green("✔"), bold(&path.display().to_string()));
                }
            } else if cli.json {
                println!("{}", serde_json::json!({ "text": text }));
            } else {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle
                    .write_all(text.as_bytes())
                    .context("Failed to write to stdout")?;
                if !text.ends_with('\n') {
                    handle.write_all(b"\n").ok();
                }
            }
        }
        ConversionResult::Artifact(artifact) => {
            let path = cli
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&artifact.filename));
            std::fs::write(&path, &artifact.bytes)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "filename": path.display().to_string(),
                        "bytes": artifact.bytes.len(),
                        "size_change": artifact.size_change,
                    })
                );
            } else if !cli.quiet {
                eprintln!(
                    "{} {}  {}",
                    green("✔"),
                    bold(&path.display().to_string()),
                    dim(&human_size(artifact.bytes.len()))
                );
                if let Some(change) = artifact.size_change {
                    eprintln!(
                        "   {} → {}  ({}% smaller)",
                        human_size(change.input_bytes),
                        human_size(change.output_bytes),
                        change.saved_percent().round() as i64
                    );
                }
            }
        }
    }
    Ok(())
}

/// Generate a flashcard deck from a single PDF input.
async fn run_flashcards(cli: &Cli, client: &ConvertClient, files: &[SelectedFile]) -> Result<()> {
    if files.len() != 1 {
        bail!("--flashcards takes exactly one PDF input");
    }
    let file = &files[0];

    let spinner = if !cli.quiet && !cli.no_progress && !cli.json {
        let bar = ProgressBar::new_spinner();
        bar.set_message(format!("Generating flashcards from {}…", file.name()));
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let deck = client
        .generate_flashcards(file)
        .await
        .context("Flashcard generation failed");
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let deck = deck?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&deck)?);
    } else if let Some(ref path) = cli.output {
        std::fs::write(path, render_flashcards_txt(&deck))
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        eprintln!(
            "{} {} cards → {}",
            green("✔"),
            bold(&deck.len().to_string()),
            bold(&path.display().to_string())
        );
    } else {
        print!("{}", render_flashcards_txt(&deck));
        eprintln!("{} {} cards", green("✔"), bold(&deck.len().to_string()));
    }
    Ok(())
}

/// Request an infographic for a single PDF input.
async fn run_infographic(cli: &Cli, client: &ConvertClient, files: &[SelectedFile]) -> Result<()> {
    if files.len() != 1 {
        bail!("--infographic takes exactly one PDF input");
    }
    let outcome = client
        .generate_infographic(&files[0])
        .await
        .context("Infographic generation failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        eprintln!(
            "{} {}",
            if outcome.success { green("✔") } else { red("✗") },
            outcome.message
        );
        println!("{}", outcome.url);
    }
    Ok(())
}
