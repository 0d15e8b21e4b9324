//! HTTP client for the conversion service.
//!
//! [`ConvertClient`] owns one `reqwest::Client` and the three endpoint
//! calls: `/api/convert` (the conversion lifecycle), `/api/flashcards`
//! (deck generation), and the infographic edge function. It is the only
//! module that touches the network; everything it sends comes from a
//! validated [`ConversionRequest`] and everything it receives goes
//! through [`crate::request::interpret_response`].
//!
//! Exactly one request is issued per submit — retry policy, if any,
//! belongs to the surrounding collaborator, not here.

use crate::config::ClientConfig;
use crate::error::ConvertError;
use crate::output::{ConversionResult, Flashcard, InfographicOutcome};
use crate::request::{error_detail, interpret_response, ConversionRequest};
use crate::store::{SelectedFile, SubmitAttempt, UploadStore};
use crate::format::FileFormat;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Outcome of [`ConvertClient::submit`].
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitStatus {
    /// The request ran to completion; the result is on the store.
    Completed,
    /// A request was already in flight; nothing was sent.
    InFlight,
}

/// Client for the document-conversion service.
pub struct ConvertClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ConvertClient {
    /// Build a client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ConvertError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConvertError::Internal(format!("HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Build a client with default configuration (local service).
    pub fn with_defaults() -> Result<Self, ConvertError> {
        Self::new(ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn convert_url(&self) -> String {
        format!("{}/api/convert", self.config.base_url)
    }

    fn flashcards_url(&self) -> String {
        format!("{}/api/flashcards", self.config.base_url)
    }

    // ── Conversion lifecycle ──────────────────────────────────────────

    /// Submit the store's current selection.
    ///
    /// Drives the full lifecycle: gates on the store's state, sends the
    /// validated request, and records the terminal state back on the
    /// store. On failure the store is left in `Failed` (interactive,
    /// immediately resubmittable) and the error is also returned for
    /// display.
    pub async fn submit(&self, store: &mut UploadStore) -> Result<SubmitStatus, ConvertError> {
        let request = match store.begin_submit()? {
            SubmitAttempt::Begin(request) => request,
            SubmitAttempt::InFlight => return Ok(SubmitStatus::InFlight),
        };

        match self.execute(&request).await {
            Ok(result) => {
                store.complete(result);
                Ok(SubmitStatus::Completed)
            }
            Err(e) => {
                store.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Issue one conversion request and interpret the response.
    ///
    /// Useful directly when the caller manages its own state; the
    /// store-driven path is [`ConvertClient::submit`].
    pub async fn execute(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ConvertError> {
        let url = self.convert_url();
        let operation = request.operation();
        let input_size = request.input_size();
        let start = Instant::now();

        if let Some(ref cb) = self.config.progress_callback {
            cb.on_request_start(operation.identifier(), request.files().len(), input_size);
        }
        info!(
            %operation,
            files = request.files().len(),
            bytes = input_size,
            "sending conversion request"
        );

        let outcome = self.execute_inner(request, &url, input_size).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &outcome {
            Ok(result) => {
                let result_bytes = match result {
                    ConversionResult::Artifact(a) => a.bytes.len(),
                    ConversionResult::Text(t) => t.len(),
                };
                info!(%operation, bytes = result_bytes, elapsed_ms, "conversion complete");
                if let Some(ref cb) = self.config.progress_callback {
                    cb.on_request_complete(operation.identifier(), result_bytes);
                }
            }
            Err(e) => {
                warn!(%operation, error = %e, elapsed_ms, "conversion failed");
                if let Some(ref cb) = self.config.progress_callback {
                    cb.on_request_error(operation.identifier(), &e.to_string());
                }
            }
        }
        outcome
    }

    async fn execute_inner(
        &self,
        request: &ConversionRequest,
        url: &str,
        input_size: usize,
    ) -> Result<ConversionResult, ConvertError> {
        let form = request.to_form()?;
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ConvertError::RequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ConvertError::RequestFailed {
                url: url.to_string(),
                reason: format!("reading response body: {e}"),
            })?;
        debug!(status, bytes = body.len(), "response received");

        interpret_response(
            request.operation(),
            status,
            body.to_vec(),
            input_size,
            request.artifact_filename(),
        )
    }

    // ── Flashcards ────────────────────────────────────────────────────

    /// Generate a flashcard deck from a PDF.
    ///
    /// Only PDFs are accepted; the check happens client-side so a bad
    /// selection never reaches the network.
    pub async fn generate_flashcards(
        &self,
        file: &SelectedFile,
    ) -> Result<Vec<Flashcard>, ConvertError> {
        if file.format() != FileFormat::Pdf {
            return Err(ConvertError::UnsupportedFormat {
                filename: file.name().to_string(),
            });
        }

        #[derive(Debug, Deserialize)]
        struct FlashcardsBody {
            flashcards: Vec<Flashcard>,
        }

        let url = self.flashcards_url();
        info!(name = %file.name(), "requesting flashcards");

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(FileFormat::Pdf.media_type())
            .map_err(|e| ConvertError::Internal(format!("multipart part: {e}")))?;
        let form = Form::new().part("file", part);

        let body = self.post_expecting_2xx(&url, form, None).await?;
        let parsed: FlashcardsBody =
            serde_json::from_slice(&body).map_err(|e| ConvertError::MalformedResponse {
                detail: format!("expected a JSON body with a 'flashcards' field: {e}"),
            })?;
        info!(cards = parsed.flashcards.len(), "flashcards generated");
        Ok(parsed.flashcards)
    }

    // ── Infographic ───────────────────────────────────────────────────

    /// Call the infographic edge function for a PDF.
    ///
    /// Requires an auth token in the configuration — the function sits
    /// behind an `Authorization` header. The server side is a declared
    /// placeholder; this client only speaks its contract.
    pub async fn generate_infographic(
        &self,
        file: &SelectedFile,
    ) -> Result<InfographicOutcome, ConvertError> {
        let token = self
            .config
            .auth_token
            .as_deref()
            .ok_or(ConvertError::AuthTokenMissing)?;
        if file.format() != FileFormat::Pdf {
            return Err(ConvertError::UnsupportedFormat {
                filename: file.name().to_string(),
            });
        }

        let url = self.config.infographic_endpoint();
        info!(name = %file.name(), "requesting infographic");

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(FileFormat::Pdf.media_type())
            .map_err(|e| ConvertError::Internal(format!("multipart part: {e}")))?;
        let form = Form::new().part("file", part);

        let body = self
            .post_expecting_2xx(&url, form, Some(token))
            .await?;
        serde_json::from_slice(&body).map_err(|e| ConvertError::MalformedResponse {
            detail: format!("unexpected infographic response: {e}"),
        })
    }

    // ── Shared plumbing ───────────────────────────────────────────────

    /// POST a multipart form, mapping transport failures and non-2xx
    /// statuses into the error taxonomy, and return the raw body.
    async fn post_expecting_2xx(
        &self,
        url: &str,
        form: Form,
        bearer: Option<&str>,
    ) -> Result<Vec<u8>, ConvertError> {
        let mut builder = self.http.post(url).multipart(form);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ConvertError::RequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ConvertError::RequestFailed {
                url: url.to_string(),
                reason: format!("reading response body: {e}"),
            })?;

        if !(200..300).contains(&status) {
            return Err(ConvertError::BackendStatus {
                status,
                detail: error_detail(&body),
            });
        }
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_join_cleanly() {
        let client = ConvertClient::new(
            ClientConfig::builder()
                .base_url("http://convert.example.com/")
                .build()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(client.convert_url(), "http://convert.example.com/api/convert");
        assert_eq!(
            client.flashcards_url(),
            "http://convert.example.com/api/flashcards"
        );
    }

    #[tokio::test]
    async fn flashcards_reject_non_pdf_before_any_network() {
        // An unroutable base URL: if the format check failed to fire
        // first, the call would error with RequestFailed instead.
        let client = ConvertClient::new(
            ClientConfig::builder()
                .base_url("http://127.0.0.1:1")
                .build()
                .unwrap(),
        )
        .unwrap();
        let file = SelectedFile::from_bytes("photo.png", vec![1, 2, 3]);
        let err = client.generate_flashcards(&file).await.unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
    }

    #[tokio::test]
    async fn infographic_requires_token_before_any_network() {
        let client = ConvertClient::new(
            ClientConfig::builder()
                .base_url("http://127.0.0.1:1")
                .build()
                .unwrap(),
        )
        .unwrap();
        let file = SelectedFile::from_bytes("doc.pdf", b"%PDF".to_vec());
        let err = client.generate_infographic(&file).await.unwrap_err();
        assert!(matches!(err, ConvertError::AuthTokenMissing));
    }
}
