//! Result types: what a completed request hands back to the caller.
//!
//! A conversion produces exactly one of two things — an opaque binary
//! artifact the user downloads, or extracted text. Both are plain owned
//! data: replacing a result drops the previous buffer, so repeated
//! conversions never accumulate dead payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal payload of one conversion request.
///
/// Exactly one variant per completed request, decided by the operation's
/// classification (text-producing vs artifact), never by content
/// sniffing.
pub enum ConversionResult {
    /// Opaque binary result, presented as a downloadable file.
    Artifact(Artifact),
    /// Extracted text (OCR and text-extraction operations).
    Text(String),
}

impl ConversionResult {
    pub fn as_artifact(&self) -> Option<&Artifact> {
        match self {
            ConversionResult::Artifact(a) => Some(a),
            ConversionResult::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConversionResult::Text(t) => Some(t),
            ConversionResult::Artifact(_) => None,
        }
    }
}

impl fmt::Debug for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionResult::Artifact(a) => f.debug_tuple("Artifact").field(a).finish(),
            ConversionResult::Text(t) => f
                .debug_struct("Text")
                .field("len", &t.len())
                .finish(),
        }
    }
}

/// A downloadable conversion artifact.
pub struct Artifact {
    /// Suggested filename, inferred from the input name and operation.
    pub filename: String,
    /// The artifact bytes as returned by the backend.
    pub bytes: Vec<u8>,
    /// Before/after sizes, recorded for compression-class operations.
    pub size_change: Option<SizeComparison>,
}

impl fmt::Debug for Artifact {
    // The payload can be megabytes; log its length, not its contents.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("filename", &self.filename)
            .field("bytes", &self.bytes.len())
            .field("size_change", &self.size_change)
            .finish()
    }
}

/// Input vs output byte sizes for a compression operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeComparison {
    pub input_bytes: usize,
    pub output_bytes: usize,
}

impl SizeComparison {
    /// Percentage saved relative to the input, clamped at zero when the
    /// "compressed" output came out larger.
    pub fn saved_percent(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        let saved = self.input_bytes.saturating_sub(self.output_bytes);
        saved as f64 * 100.0 / self.input_bytes as f64
    }
}

/// One question/answer pair from the flashcard generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// Render a deck in the plain-text export format (`Q:`/`A:` lines,
/// blank line between cards).
pub fn render_flashcards_txt(cards: &[Flashcard]) -> String {
    let mut out = String::new();
    for card in cards {
        out.push_str("Q: ");
        out.push_str(&card.question);
        out.push_str("\nA: ");
        out.push_str(&card.answer);
        out.push_str("\n\n");
    }
    out
}

/// Response of the infographic endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfographicOutcome {
    pub success: bool,
    pub message: String,
    pub url: String,
}

/// Format a byte count for display: `512 B`, `3.4 KB`, `1.2 MB`.
pub fn human_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / MB)
    }
}
