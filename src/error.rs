//! Error types for the doc2x library.
//!
//! A single [`ConvertError`] taxonomy covers the whole client surface.
//! The variants fall into four recovery classes:
//!
//! * **Validation** — the submit never reaches the network
//!   ([`ConvertError::NoFileSelected`], [`ConvertError::NoOperationSelected`],
//!   [`ConvertError::InvalidParameters`], [`ConvertError::AuthTokenMissing`]).
//! * **Selection errors** — an operation outside the derived catalog
//!   ([`ConvertError::OperationNotAvailable`]) or a file whose format
//!   unlocks nothing ([`ConvertError::UnsupportedFormat`], non-fatal).
//! * **Request failures** — transport or backend trouble after the wire
//!   was touched ([`ConvertError::RequestFailed`],
//!   [`ConvertError::BackendStatus`], [`ConvertError::MalformedResponse`]).
//! * **Local I/O and configuration** — file ingestion and builder
//!   validation.
//!
//! None are fatal to the process: the upload store stays interactive
//! after any failure and the lifecycle returns to a terminal state that
//! permits immediate resubmission.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the doc2x library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Validation (blocks the request, never reaches the network) ────
    /// Submit was attempted with no file selected in the active mode.
    #[error("No file selected — upload a file before converting.")]
    NoFileSelected,

    /// Submit was attempted with no operation selected.
    #[error("No operation selected for the current file.")]
    NoOperationSelected,

    /// An operation-specific parameter is missing or out of range.
    #[error("Invalid parameters for '{operation}': {detail}")]
    InvalidParameters { operation: String, detail: String },

    /// The infographic endpoint requires an auth token and none is configured.
    #[error("No authorization token configured — set one with ClientConfig::builder().auth_token(...).")]
    AuthTokenMissing,

    // ── Selection errors ──────────────────────────────────────────────
    /// The resolved format unlocks no operations. Non-fatal: the file
    /// stays selected so the caller can surface a notification.
    #[error("Unsupported format for '{filename}': no conversions available.")]
    UnsupportedFormat { filename: String },

    /// The requested operation is not in the list derived from the
    /// active format and mode. The selection is left unchanged.
    #[error("Operation '{operation}' is not available for format '{format}'.")]
    OperationNotAvailable { operation: String, format: String },

    // ── Request failures ──────────────────────────────────────────────
    /// Transport-level failure: connection refused, timeout, TLS.
    #[error("Request to {url} failed: {reason}\nCheck that the conversion service is running.")]
    RequestFailed { url: String, reason: String },

    /// The backend answered with a non-2xx status.
    #[error("Conversion service returned HTTP {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    BackendStatus { status: u16, detail: Option<String> },

    /// A text-producing operation returned a body without the expected
    /// field. Surfaced like a transport failure, per the error design.
    #[error("Malformed response from conversion service: {detail}")]
    MalformedResponse { detail: String },

    // ── Local I/O (CLI-side file ingestion) ───────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Any other read failure.
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConvertError {
    /// True for errors raised before any network traffic, i.e. the
    /// resubmit-immediately class.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConvertError::NoFileSelected
                | ConvertError::NoOperationSelected
                | ConvertError::InvalidParameters { .. }
                | ConvertError::AuthTokenMissing
                | ConvertError::OperationNotAvailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_status_display_with_detail() {
        let e = ConvertError::BackendStatus {
            status: 400,
            detail: Some("Password is required for PDF protection".into()),
        };
        let msg = e.to_string();
        assert!(msg.contains("400"), "got: {msg}");
        assert!(msg.contains("Password is required"), "got: {msg}");
    }

    #[test]
    fn backend_status_display_without_detail() {
        let e = ConvertError::BackendStatus {
            status: 502,
            detail: None,
        };
        assert!(e.to_string().contains("502"));
    }

    #[test]
    fn operation_not_available_display() {
        let e = ConvertError::OperationNotAvailable {
            operation: "merge-pdfs".into(),
            format: "png".into(),
        };
        assert!(e.to_string().contains("merge-pdfs"));
        assert!(e.to_string().contains("png"));
    }

    #[test]
    fn validation_class() {
        assert!(ConvertError::NoFileSelected.is_validation());
        assert!(ConvertError::AuthTokenMissing.is_validation());
        assert!(!ConvertError::MalformedResponse {
            detail: "missing 'text'".into()
        }
        .is_validation());
        assert!(!ConvertError::BackendStatus {
            status: 500,
            detail: None
        }
        .is_validation());
    }
}
