//! Operation catalog: which conversions a format unlocks, and how each
//! operation behaves on the wire.
//!
//! [`Operation`] is a closed enum rather than a free-form identifier
//! string so that every consumer — parameter applicability, response
//! interpretation, filename inference — matches exhaustively. Adding an
//! operation is a compile-visible change at every site that cares.
//!
//! The per-format tables are ordered: the first entry is the default
//! selection and the display order in any front-end. Ties cannot occur
//! because each table is written out explicitly per tag.

use crate::format::FileFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named conversion/compression/security action selectable for a
/// given format.
///
/// The serialized form is the backend's `conversion_type` identifier
/// (e.g. `pdf-to-docx`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    // ── Single-file operations ────────────────────────────────────────
    PdfToDocx,
    PdfToXlsx,
    PdfToPptx,
    PdfToJpg,
    PdfToText,
    PdfCompress,
    PdfProtect,
    PdfUnlock,
    PdfOcr,
    DocxToPdf,
    XlsxToPdf,
    PptxToPdf,
    JpgToPng,
    JpgToPdf,
    PngToJpg,
    PngToPdf,
    ImageToText,
    ImageCompress,
    TextToPdf,
    // ── Batch operations ──────────────────────────────────────────────
    MergePdfs,
    SplitPdf,
    BatchCompress,
    BatchCompressImages,
    BatchConvertToPdf,
}

impl Operation {
    /// The backend's `conversion_type` identifier for this operation.
    pub fn identifier(&self) -> &'static str {
        match self {
            Operation::PdfToDocx => "pdf-to-docx",
            Operation::PdfToXlsx => "pdf-to-xlsx",
            Operation::PdfToPptx => "pdf-to-pptx",
            Operation::PdfToJpg => "pdf-to-jpg",
            Operation::PdfToText => "pdf-to-text",
            Operation::PdfCompress => "pdf-compress",
            Operation::PdfProtect => "pdf-protect",
            Operation::PdfUnlock => "pdf-unlock",
            Operation::PdfOcr => "pdf-ocr",
            Operation::DocxToPdf => "docx-to-pdf",
            Operation::XlsxToPdf => "xlsx-to-pdf",
            Operation::PptxToPdf => "pptx-to-pdf",
            Operation::JpgToPng => "jpg-to-png",
            Operation::JpgToPdf => "jpg-to-pdf",
            Operation::PngToJpg => "png-to-jpg",
            Operation::PngToPdf => "png-to-pdf",
            Operation::ImageToText => "image-to-text",
            Operation::ImageCompress => "image-compress",
            Operation::TextToPdf => "text-to-pdf",
            Operation::MergePdfs => "merge-pdfs",
            Operation::SplitPdf => "split-pdf",
            Operation::BatchCompress => "batch-compress",
            Operation::BatchCompressImages => "batch-compress-images",
            Operation::BatchConvertToPdf => "batch-convert-to-pdf",
        }
    }

    /// Human-readable label for selection menus.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::PdfToDocx => "Convert to Word",
            Operation::PdfToXlsx => "Convert to Excel",
            Operation::PdfToPptx => "Convert to PowerPoint",
            Operation::PdfToJpg => "Convert to JPG",
            Operation::PdfToText => "Extract Text",
            Operation::PdfCompress => "Compress PDF",
            Operation::PdfProtect => "Protect with Password",
            Operation::PdfUnlock => "Remove Password",
            Operation::PdfOcr => "OCR Scanned PDF",
            Operation::DocxToPdf => "Convert to PDF",
            Operation::XlsxToPdf => "Convert to PDF",
            Operation::PptxToPdf => "Convert to PDF",
            Operation::JpgToPng => "Convert to PNG",
            Operation::JpgToPdf => "Convert to PDF",
            Operation::PngToJpg => "Convert to JPG",
            Operation::PngToPdf => "Convert to PDF",
            Operation::ImageToText => "Extract Text (OCR)",
            Operation::ImageCompress => "Compress Image",
            Operation::TextToPdf => "Convert to PDF",
            Operation::MergePdfs => "Merge PDFs",
            Operation::SplitPdf => "Split PDF",
            Operation::BatchCompress => "Compress All PDFs",
            Operation::BatchCompressImages => "Compress All Images",
            Operation::BatchConvertToPdf => "Convert All to PDF",
        }
    }

    /// Parse a backend identifier back into an [`Operation`].
    pub fn from_identifier(s: &str) -> Option<Self> {
        ALL_OPERATIONS.iter().copied().find(|op| op.identifier() == s)
    }

    /// True when the response body is structured JSON carrying extracted
    /// text rather than a binary artifact.
    pub fn is_text_producing(&self) -> bool {
        matches!(
            self,
            Operation::ImageToText | Operation::PdfToText | Operation::PdfOcr
        )
    }

    /// True for operations that take a `compression_level` parameter and
    /// whose artifact is compared against the input size.
    pub fn is_compression(&self) -> bool {
        matches!(
            self,
            Operation::PdfCompress
                | Operation::ImageCompress
                | Operation::BatchCompress
                | Operation::BatchCompressImages
        )
    }

    /// True for operations that require a password.
    pub fn requires_password(&self) -> bool {
        matches!(self, Operation::PdfProtect | Operation::PdfUnlock)
    }

    /// True for operations that require split ranges.
    pub fn requires_split_ranges(&self) -> bool {
        matches!(self, Operation::SplitPdf)
    }

    /// True for operations submitted with the repeated `files` field
    /// rather than the single `file` field.
    pub fn is_batch(&self) -> bool {
        matches!(
            self,
            Operation::MergePdfs
                | Operation::SplitPdf
                | Operation::BatchCompress
                | Operation::BatchCompressImages
                | Operation::BatchConvertToPdf
        )
    }

    /// Infer the artifact filename the backend would attach for this
    /// operation, given the (first) input filename.
    ///
    /// Follows the backend's naming scheme: input stem plus an
    /// operation-specific extension or suffix. Text-producing operations
    /// have no artifact and fall back to a `.txt` name for callers that
    /// save extracted text to disk.
    pub fn artifact_filename(&self, input_name: &str) -> String {
        let stem = input_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .filter(|s| !s.is_empty())
            .unwrap_or(input_name);

        match self {
            Operation::PdfToDocx => format!("{stem}.docx"),
            Operation::PdfToXlsx => format!("{stem}.xlsx"),
            Operation::PdfToPptx => format!("{stem}.pptx"),
            Operation::PdfToJpg => format!("{stem}.jpg"),
            Operation::DocxToPdf
            | Operation::XlsxToPdf
            | Operation::PptxToPdf
            | Operation::JpgToPdf
            | Operation::PngToPdf
            | Operation::TextToPdf => format!("{stem}.pdf"),
            Operation::JpgToPng => format!("{stem}.png"),
            Operation::PngToJpg => format!("{stem}.jpg"),
            Operation::PdfCompress => format!("{stem}-compressed.pdf"),
            Operation::ImageCompress => format!("{stem}-compressed.jpg"),
            Operation::PdfProtect => format!("{stem}-protected.pdf"),
            Operation::PdfUnlock => format!("{stem}-unlocked.pdf"),
            Operation::SplitPdf => format!("{stem}-split.pdf"),
            Operation::MergePdfs => "merged.pdf".to_string(),
            Operation::BatchCompress => "compressed.pdf".to_string(),
            Operation::BatchCompressImages => "compressed.jpg".to_string(),
            Operation::BatchConvertToPdf => "converted.pdf".to_string(),
            Operation::PdfToText | Operation::ImageToText | Operation::PdfOcr => {
                format!("{stem}.txt")
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Every operation, for identifier lookups and exhaustiveness tests.
pub const ALL_OPERATIONS: &[Operation] = &[
    Operation::PdfToDocx,
    Operation::PdfToXlsx,
    Operation::PdfToPptx,
    Operation::PdfToJpg,
    Operation::PdfToText,
    Operation::PdfCompress,
    Operation::PdfProtect,
    Operation::PdfUnlock,
    Operation::PdfOcr,
    Operation::DocxToPdf,
    Operation::XlsxToPdf,
    Operation::PptxToPdf,
    Operation::JpgToPng,
    Operation::JpgToPdf,
    Operation::PngToJpg,
    Operation::PngToPdf,
    Operation::ImageToText,
    Operation::ImageCompress,
    Operation::TextToPdf,
    Operation::MergePdfs,
    Operation::SplitPdf,
    Operation::BatchCompress,
    Operation::BatchCompressImages,
    Operation::BatchConvertToPdf,
];

/// Ordered single-file operations available for a format.
///
/// The first entry becomes the default selection. `Unknown` unlocks
/// nothing; every other tag unlocks at least one operation.
pub fn single_operations(format: FileFormat) -> &'static [Operation] {
    match format {
        FileFormat::Pdf => &[
            Operation::PdfToDocx,
            Operation::PdfToXlsx,
            Operation::PdfToPptx,
            Operation::PdfToJpg,
            Operation::PdfToText,
            Operation::PdfCompress,
            Operation::PdfProtect,
            Operation::PdfUnlock,
            Operation::PdfOcr,
        ],
        FileFormat::Word => &[Operation::DocxToPdf],
        FileFormat::Excel => &[Operation::XlsxToPdf],
        FileFormat::Powerpoint => &[Operation::PptxToPdf],
        FileFormat::Jpg => &[
            Operation::JpgToPng,
            Operation::JpgToPdf,
            Operation::ImageToText,
            Operation::ImageCompress,
        ],
        FileFormat::Png => &[
            Operation::PngToJpg,
            Operation::PngToPdf,
            Operation::ImageToText,
            Operation::ImageCompress,
        ],
        FileFormat::Gif => &[Operation::ImageToText],
        FileFormat::Text => &[Operation::TextToPdf],
        FileFormat::Unknown => &[],
    }
}

/// Ordered batch operations available for a format.
///
/// PDFs unlock merge/split/batch-compress; any raster image format
/// unlocks the image batch pair; everything else unlocks nothing.
pub fn batch_operations(format: FileFormat) -> &'static [Operation] {
    match format {
        FileFormat::Pdf => &[
            Operation::MergePdfs,
            Operation::SplitPdf,
            Operation::BatchCompress,
        ],
        FileFormat::Jpg | FileFormat::Png | FileFormat::Gif => &[
            Operation::BatchCompressImages,
            Operation::BatchConvertToPdf,
        ],
        FileFormat::Word
        | FileFormat::Excel
        | FileFormat::Powerpoint
        | FileFormat::Text
        | FileFormat::Unknown => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_single_list_exact_order() {
        let ops: Vec<&str> = single_operations(FileFormat::Pdf)
            .iter()
            .map(|op| op.identifier())
            .collect();
        assert_eq!(
            ops,
            vec![
                "pdf-to-docx",
                "pdf-to-xlsx",
                "pdf-to-pptx",
                "pdf-to-jpg",
                "pdf-to-text",
                "pdf-compress",
                "pdf-protect",
                "pdf-unlock",
                "pdf-ocr",
            ]
        );
    }

    #[test]
    fn single_list_non_empty_iff_known_format() {
        let formats = [
            FileFormat::Pdf,
            FileFormat::Word,
            FileFormat::Excel,
            FileFormat::Powerpoint,
            FileFormat::Jpg,
            FileFormat::Png,
            FileFormat::Gif,
            FileFormat::Text,
        ];
        for f in formats {
            assert!(!single_operations(f).is_empty(), "{f} should unlock operations");
        }
        assert!(single_operations(FileFormat::Unknown).is_empty());
    }

    #[test]
    fn office_formats_unlock_exactly_convert_to_pdf() {
        assert_eq!(single_operations(FileFormat::Word), &[Operation::DocxToPdf]);
        assert_eq!(single_operations(FileFormat::Excel), &[Operation::XlsxToPdf]);
        assert_eq!(
            single_operations(FileFormat::Powerpoint),
            &[Operation::PptxToPdf]
        );
    }

    #[test]
    fn batch_tables() {
        assert_eq!(
            batch_operations(FileFormat::Pdf),
            &[
                Operation::MergePdfs,
                Operation::SplitPdf,
                Operation::BatchCompress
            ]
        );
        for f in [FileFormat::Jpg, FileFormat::Png, FileFormat::Gif] {
            assert_eq!(
                batch_operations(f),
                &[Operation::BatchCompressImages, Operation::BatchConvertToPdf]
            );
        }
        assert!(batch_operations(FileFormat::Word).is_empty());
        assert!(batch_operations(FileFormat::Text).is_empty());
        assert!(batch_operations(FileFormat::Unknown).is_empty());
    }

    #[test]
    fn identifier_round_trip() {
        for &op in ALL_OPERATIONS {
            assert_eq!(Operation::from_identifier(op.identifier()), Some(op));
        }
        assert_eq!(Operation::from_identifier("pdf-to-nothing"), None);
    }

    #[test]
    fn text_producing_and_compression_are_disjoint() {
        for &op in ALL_OPERATIONS {
            assert!(
                !(op.is_text_producing() && op.is_compression()),
                "{op} cannot be both"
            );
        }
    }

    #[test]
    fn batch_flag_matches_batch_tables() {
        // Every operation reachable from a batch table is a batch
        // operation, and appears in no single table.
        let formats = [
            FileFormat::Pdf,
            FileFormat::Word,
            FileFormat::Excel,
            FileFormat::Powerpoint,
            FileFormat::Jpg,
            FileFormat::Png,
            FileFormat::Gif,
            FileFormat::Text,
            FileFormat::Unknown,
        ];
        for f in formats {
            for op in batch_operations(f) {
                assert!(op.is_batch(), "{op} listed in a batch table");
            }
            for op in single_operations(f) {
                assert!(!op.is_batch(), "{op} listed in a single table");
            }
        }
    }

    #[test]
    fn artifact_filenames_follow_backend_naming() {
        assert_eq!(
            Operation::PdfToDocx.artifact_filename("report.pdf"),
            "report.docx"
        );
        assert_eq!(
            Operation::PdfCompress.artifact_filename("report.pdf"),
            "report-compressed.pdf"
        );
        assert_eq!(
            Operation::PdfProtect.artifact_filename("report.pdf"),
            "report-protected.pdf"
        );
        assert_eq!(
            Operation::PdfUnlock.artifact_filename("secret.pdf"),
            "secret-unlocked.pdf"
        );
        assert_eq!(
            Operation::SplitPdf.artifact_filename("book.pdf"),
            "book-split.pdf"
        );
        assert_eq!(Operation::MergePdfs.artifact_filename("a.pdf"), "merged.pdf");
        assert_eq!(
            Operation::PngToJpg.artifact_filename("icon.png"),
            "icon.jpg"
        );
        // No extension on the input: the whole name is the stem.
        assert_eq!(
            Operation::PdfToText.artifact_filename("notes"),
            "notes.txt"
        );
    }

    #[test]
    fn serde_uses_backend_identifiers() {
        let json = serde_json::to_string(&Operation::PdfToDocx).unwrap();
        assert_eq!(json, "\"pdf-to-docx\"");
        let op: Operation = serde_json::from_str("\"batch-compress-images\"").unwrap();
        assert_eq!(op, Operation::BatchCompressImages);
    }
}
