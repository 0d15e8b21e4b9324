//! # doc2x
//!
//! Client library and CLI for a document-conversion service: format
//! detection, per-format operation catalogs, and a multipart upload
//! lifecycle against an external HTTP backend.
//!
//! ## Why this crate?
//!
//! The hard parts of document tooling — conversion engines, OCR models,
//! PDF manipulation — live behind an HTTP service. What a front-end
//! actually needs is everything around that call, done correctly: which
//! operations a file unlocks, a selection store whose derived state can
//! never drift from the selected files, a request lifecycle that admits
//! exactly one in-flight request, and response handling that knows which
//! operations return text and which return bytes. This crate is that
//! layer, with no rendering framework attached.
//!
//! ## Pipeline Overview
//!
//! ```text
//! file(s)
//!  │
//!  ├─ 1. Resolve   filename → FileFormat tag
//!  ├─ 2. Catalog   FileFormat → ordered Operation lists (single/batch)
//!  ├─ 3. Select    UploadStore validates operation + parameters
//!  ├─ 4. Submit    Idle → Requesting, one multipart POST /api/convert
//!  └─ 5. Interpret text-producing → Text, else → downloadable Artifact
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc2x::{ClientConfig, ConvertClient, Operation, SelectedFile, UploadStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ConvertClient::new(ClientConfig::default())?;
//!     let mut store = UploadStore::new();
//!
//!     store.set_file(SelectedFile::from_path("report.pdf")?)?;
//!     store.select_operation(Operation::PdfToText)?;
//!     client.submit(&mut store).await?;
//!
//!     if let Some(text) = store.result().and_then(|r| r.as_text()) {
//!         println!("{text}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `doc2x` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in
//! CLI-only deps:
//! ```toml
//! doc2x = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod output;
pub mod params;
pub mod progress;
pub mod request;
pub mod store;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use catalog::{batch_operations, single_operations, Operation, ALL_OPERATIONS};
pub use client::{ConvertClient, SubmitStatus};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use error::ConvertError;
pub use format::FileFormat;
pub use output::{
    human_size, render_flashcards_txt, Artifact, ConversionResult, Flashcard,
    InfographicOutcome, SizeComparison,
};
pub use params::{validate_split_ranges, AppliedParameters, ConversionParameters};
pub use progress::{NoopProgressCallback, ProgressCallback, RequestProgressCallback};
pub use request::{interpret_response, ConversionRequest};
pub use store::{RequestState, SelectedFile, SelectionMode, SubmitAttempt, UploadStore};
