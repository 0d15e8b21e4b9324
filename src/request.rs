//! Outbound payload assembly and response interpretation.
//!
//! A [`ConversionRequest`] is self-contained: it owns cloned file
//! payloads, the operation, and only the parameters that apply to it.
//! The textual field set is kept as plain data ([`text_fields`]) and
//! turned into a `reqwest` multipart form at the last moment, so tests
//! can assert exactly what goes on the wire without a network in sight.
//!
//! Interpretation is driven by the operation's classification, never by
//! sniffing the body: text-producing operations parse JSON and extract
//! the `text` field, everything else is an opaque artifact.
//!
//! [`text_fields`]: ConversionRequest::text_fields

use crate::catalog::Operation;
use crate::error::ConvertError;
use crate::output::{Artifact, ConversionResult, SizeComparison};
use crate::params::AppliedParameters;
use crate::store::SelectedFile;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

/// Multipart field name for the single-mode file.
const FIELD_FILE: &str = "file";
/// Multipart field name, repeated once per file, in batch mode.
const FIELD_FILES: &str = "files";

/// One validated, ready-to-send conversion request.
///
/// Produced only by [`crate::store::UploadStore::begin_submit`]; there
/// is no way to build one with parameters the operation does not take.
#[derive(Debug)]
pub struct ConversionRequest {
    operation: Operation,
    files: Vec<SelectedFile>,
    params: AppliedParameters,
}

impl ConversionRequest {
    pub(crate) fn new(
        operation: Operation,
        files: Vec<SelectedFile>,
        params: AppliedParameters,
    ) -> Self {
        Self {
            operation,
            files,
            params,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    /// Total input payload size, the "before" side of a compression
    /// comparison.
    pub fn input_size(&self) -> usize {
        self.files.iter().map(|f| f.size()).sum()
    }

    /// Suggested filename for the artifact this request will produce.
    pub fn artifact_filename(&self) -> String {
        let first = self.files.first().map(|f| f.name()).unwrap_or("output");
        self.operation.artifact_filename(first)
    }

    /// The textual form fields, in send order: `conversion_type` first,
    /// then the operation's applicable parameters.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![(
            "conversion_type",
            self.operation.identifier().to_string(),
        )];
        if let Some(level) = self.params.compression_level {
            fields.push(("compression_level", level.to_string()));
        }
        if let Some(ref password) = self.params.password {
            fields.push(("password", password.clone()));
        }
        if let Some(ref ranges) = self.params.split_ranges {
            fields.push(("split_ranges", ranges.clone()));
        }
        fields
    }

    /// Build the multipart body: `file` (single) or repeated `files`
    /// (batch, preserving selection order), then the text fields.
    pub(crate) fn to_form(&self) -> Result<Form, ConvertError> {
        let mut form = Form::new();
        let field = if self.operation.is_batch() {
            FIELD_FILES
        } else {
            FIELD_FILE
        };

        for file in &self.files {
            let media_type = file.format().media_type();
            let (name, bytes) = file.clone().into_parts();
            let part = Part::bytes(bytes)
                .file_name(name)
                .mime_str(media_type)
                .map_err(|e| ConvertError::Internal(format!("multipart part: {e}")))?;
            form = form.part(field, part);
        }

        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

/// JSON body of a text-producing operation's response.
#[derive(Debug, Deserialize)]
struct TextBody {
    text: String,
}

/// Error body shapes the backend is known to produce.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    detail: Option<String>,
}

/// Extract a human-readable detail from a non-2xx body, if it carried
/// one.
pub(crate) fn error_detail(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.is_empty())
}

/// Interpret a response body according to the operation's kind.
///
/// * Non-2xx → [`ConvertError::BackendStatus`], carrying any `detail`
///   the backend's JSON error body had.
/// * Text-producing operation → parse `{"text": ...}`; a body without
///   the field is [`ConvertError::MalformedResponse`].
/// * Anything else → [`ConversionResult::Artifact`], recording a
///   before/after size comparison for compression-class operations.
pub fn interpret_response(
    operation: Operation,
    status: u16,
    body: Vec<u8>,
    input_size: usize,
    artifact_filename: String,
) -> Result<ConversionResult, ConvertError> {
    if !(200..300).contains(&status) {
        return Err(ConvertError::BackendStatus {
            status,
            detail: error_detail(&body),
        });
    }

    if operation.is_text_producing() {
        let parsed: TextBody =
            serde_json::from_slice(&body).map_err(|e| ConvertError::MalformedResponse {
                detail: format!("expected a JSON body with a 'text' field: {e}"),
            })?;
        debug!(operation = %operation, chars = parsed.text.len(), "text response");
        return Ok(ConversionResult::Text(parsed.text));
    }

    let size_change = operation.is_compression().then(|| SizeComparison {
        input_bytes: input_size,
        output_bytes: body.len(),
    });
    debug!(
        operation = %operation,
        bytes = body.len(),
        "artifact response"
    );
    Ok(ConversionResult::Artifact(Artifact {
        filename: artifact_filename,
        bytes: body,
        size_change,
    }))
}
