//! Upload store: the single source of truth for "what files are
//! selected and what can be done with them".
//!
//! The store is a plain state container with pure transition methods —
//! no I/O, no async — so every rule about selections, derived
//! operations, and the request lifecycle is testable without a network
//! or a rendering layer. The HTTP side ([`crate::client::ConvertClient`])
//! only ever sees the validated [`ConversionRequest`] the store hands
//! out on a successful submit.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──begin_submit()──▶ Requesting ──complete()──▶ Succeeded(result)
//!   ▲                          │       └─fail()─────▶ Failed(reason)
//!   └── any selection change ──┴──────────────────────────┘
//! ```
//!
//! While `Requesting`, further submits are no-ops (ignored, not queued):
//! at most one request is in flight per store.

use crate::catalog::{batch_operations, single_operations, Operation};
use crate::error::ConvertError;
use crate::format::FileFormat;
use crate::output::ConversionResult;
use crate::params::ConversionParameters;
use crate::request::ConversionRequest;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One file the user is operating on: name plus in-memory payload.
///
/// Replaced wholesale on every selection change, never mutated in place.
#[derive(Clone)]
pub struct SelectedFile {
    name: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    /// Wrap an in-memory payload.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk, distinguishing not-found from
    /// permission-denied so the caller can show an actionable message.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConvertError::FileNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => ConvertError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => ConvertError::FileRead {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| ConvertError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Format tag, recomputed from the name on each call.
    pub fn format(&self) -> FileFormat {
        FileFormat::from_filename(&self.name)
    }

    pub(crate) fn into_parts(self) -> (String, Vec<u8>) {
        (self.name, self.bytes)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Which selection the store is currently operating on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Single,
    Batch,
}

/// The conversion request lifecycle.
#[derive(Debug, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Requesting,
    Succeeded(ConversionResult),
    Failed(String),
}

impl RequestState {
    pub fn is_requesting(&self) -> bool {
        matches!(self, RequestState::Requesting)
    }
}

/// Outcome of a submit attempt that did not fail validation.
#[derive(Debug)]
pub enum SubmitAttempt {
    /// The store transitioned to `Requesting`; issue this request.
    Begin(ConversionRequest),
    /// A request is already in flight; this submit was ignored.
    InFlight,
}

/// State container for file selection, derived operations, and the
/// request lifecycle.
#[derive(Debug, Default)]
pub struct UploadStore {
    mode: SelectionMode,
    single: Option<SelectedFile>,
    single_operation: Option<Operation>,
    batch: Vec<SelectedFile>,
    batch_operation: Option<Operation>,
    params: ConversionParameters,
    state: RequestState,
}

impl UploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mode ──────────────────────────────────────────────────────────

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch between single and batch mode.
    ///
    /// The inactive mode's selection is preserved; only the lifecycle
    /// and result state are reset, since a result belongs to the mode
    /// that produced it.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode != mode {
            debug!(?mode, "switching selection mode");
            self.mode = mode;
            self.state = RequestState::Idle;
        }
    }

    // ── Single-file selection ─────────────────────────────────────────

    pub fn file(&self) -> Option<&SelectedFile> {
        self.single.as_ref()
    }

    /// Select a single file, replacing any previous selection.
    ///
    /// Resolves the format, derives the operation list, auto-selects
    /// its first entry, and resets any prior result. When the format
    /// unlocks nothing the file is still stored (so the caller can show
    /// what was rejected) but the operation stays unset and an
    /// [`ConvertError::UnsupportedFormat`] signal is returned. That
    /// signal is a notification, not a failure — the store remains
    /// fully interactive.
    pub fn set_file(&mut self, file: SelectedFile) -> Result<(), ConvertError> {
        let format = file.format();
        let ops = single_operations(format);
        info!(name = %file.name(), %format, operations = ops.len(), "file selected");

        let filename = file.name().to_string();
        self.single = Some(file);
        self.single_operation = ops.first().copied();
        self.state = RequestState::Idle;

        if ops.is_empty() {
            return Err(ConvertError::UnsupportedFormat { filename });
        }
        Ok(())
    }

    /// Drop the single-file selection and its derived state.
    pub fn clear_file(&mut self) {
        self.single = None;
        self.single_operation = None;
        self.state = RequestState::Idle;
    }

    // ── Batch selection ───────────────────────────────────────────────

    pub fn batch_files(&self) -> &[SelectedFile] {
        &self.batch
    }

    /// Append files to the batch selection (selection order is merge
    /// order; duplicates are allowed).
    pub fn add_batch_files(&mut self, files: Vec<SelectedFile>) {
        self.batch.extend(files);
        self.refresh_batch_operation();
        self.state = RequestState::Idle;
    }

    /// Replace the batch selection wholesale.
    pub fn set_batch_files(&mut self, files: Vec<SelectedFile>) {
        self.batch = files;
        self.refresh_batch_operation();
        self.state = RequestState::Idle;
    }

    /// Remove one file by index, preserving the order of the remainder.
    /// Returns the removed file, or `None` when the index is out of
    /// range (no state change).
    pub fn remove_batch_file(&mut self, index: usize) -> Option<SelectedFile> {
        if index >= self.batch.len() {
            return None;
        }
        let removed = self.batch.remove(index);
        self.refresh_batch_operation();
        self.state = RequestState::Idle;
        Some(removed)
    }

    /// Clear the batch selection entirely.
    pub fn clear_batch(&mut self) {
        self.batch.clear();
        self.batch_operation = None;
        self.state = RequestState::Idle;
    }

    /// Re-derive the batch operation list and keep the selection valid.
    ///
    /// The batch table is keyed by the first file's format; the current
    /// selection is kept when still listed, otherwise the first entry
    /// becomes the default.
    fn refresh_batch_operation(&mut self) {
        let ops = self
            .batch
            .first()
            .map(|f| batch_operations(f.format()))
            .unwrap_or(&[]);

        match self.batch_operation {
            Some(op) if ops.contains(&op) => {}
            _ => self.batch_operation = ops.first().copied(),
        }
    }

    // ── Derived state ─────────────────────────────────────────────────

    /// Format of the active selection (first file in batch mode).
    pub fn format(&self) -> Option<FileFormat> {
        match self.mode {
            SelectionMode::Single => self.single.as_ref().map(|f| f.format()),
            SelectionMode::Batch => self.batch.first().map(|f| f.format()),
        }
    }

    /// Ordered operations available for the active selection; empty
    /// when nothing is selected.
    pub fn available_operations(&self) -> &'static [Operation] {
        match self.mode {
            SelectionMode::Single => self
                .single
                .as_ref()
                .map(|f| single_operations(f.format()))
                .unwrap_or(&[]),
            SelectionMode::Batch => self
                .batch
                .first()
                .map(|f| batch_operations(f.format()))
                .unwrap_or(&[]),
        }
    }

    /// The operation currently selected for the active mode.
    pub fn selected_operation(&self) -> Option<Operation> {
        match self.mode {
            SelectionMode::Single => self.single_operation,
            SelectionMode::Batch => self.batch_operation,
        }
    }

    /// Explicitly select an operation.
    ///
    /// Membership in the currently derived list is enforced: selecting
    /// an operation outside it is a caller error and leaves the store
    /// untouched (no silent coercion). A successful selection resets
    /// any prior result.
    pub fn select_operation(&mut self, operation: Operation) -> Result<(), ConvertError> {
        if !self.available_operations().contains(&operation) {
            return Err(ConvertError::OperationNotAvailable {
                operation: operation.identifier().to_string(),
                format: self
                    .format()
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            });
        }
        match self.mode {
            SelectionMode::Single => self.single_operation = Some(operation),
            SelectionMode::Batch => self.batch_operation = Some(operation),
        }
        self.state = RequestState::Idle;
        Ok(())
    }

    // ── Parameters ────────────────────────────────────────────────────

    pub fn parameters(&self) -> &ConversionParameters {
        &self.params
    }

    pub fn set_compression_level(&mut self, level: u8) {
        self.params.compression_level = Some(level);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.params.password = Some(password.into());
    }

    pub fn set_split_ranges(&mut self, ranges: impl Into<String>) {
        self.params.split_ranges = Some(ranges.into());
    }

    pub fn set_parameters(&mut self, params: ConversionParameters) {
        self.params = params;
    }

    // ── Lifecycle ─────────────────────────────────────────────────────

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// The result of the last completed request, if any.
    pub fn result(&self) -> Option<&ConversionResult> {
        match &self.state {
            RequestState::Succeeded(r) => Some(r),
            _ => None,
        }
    }

    /// Gate a submit.
    ///
    /// * While `Requesting`, returns [`SubmitAttempt::InFlight`] — the
    ///   submit is ignored, not queued.
    /// * Precondition failures (no file, no operation, bad parameters)
    ///   return a validation-class error and the state is unchanged; no
    ///   request reaches the network.
    /// * Otherwise the prior result is dropped immediately, the state
    ///   moves to `Requesting`, and the validated request is returned.
    pub fn begin_submit(&mut self) -> Result<SubmitAttempt, ConvertError> {
        if self.state.is_requesting() {
            debug!("submit ignored: request already in flight");
            return Ok(SubmitAttempt::InFlight);
        }

        let (files, operation) = match self.mode {
            SelectionMode::Single => {
                let file = self.single.as_ref().ok_or(ConvertError::NoFileSelected)?;
                let op = self
                    .single_operation
                    .ok_or(ConvertError::NoOperationSelected)?;
                (vec![file.clone()], op)
            }
            SelectionMode::Batch => {
                if self.batch.is_empty() {
                    return Err(ConvertError::NoFileSelected);
                }
                let op = self
                    .batch_operation
                    .ok_or(ConvertError::NoOperationSelected)?;
                (self.batch.clone(), op)
            }
        };

        let applied = self.params.validate_for(operation)?;
        let request = ConversionRequest::new(operation, files, applied);

        info!(operation = %operation, files = request.files().len(), "submit accepted");
        self.state = RequestState::Requesting;
        Ok(SubmitAttempt::Begin(request))
    }

    /// Record a successful completion.
    pub fn complete(&mut self, result: ConversionResult) {
        debug!("request completed");
        self.state = RequestState::Succeeded(result);
    }

    /// Record a failure; the reason is an opaque display message.
    pub fn fail(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        debug!(%reason, "request failed");
        self.state = RequestState::Failed(reason);
    }
}
