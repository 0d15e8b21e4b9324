//! Format detection: map a filename to a canonical [`FileFormat`] tag.
//!
//! The tag is derived from the extension alone — the backend re-validates
//! actual content, so sniffing magic bytes here would only duplicate work
//! and force the store to read payloads it otherwise treats as opaque.
//! Resolution is a total function: any string, including one with no
//! extension at all, maps to a tag ([`FileFormat::Unknown`] in the worst
//! case), so callers never handle a failure path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical short identifier for a file's type.
///
/// Derived from the filename on every selection change and never stored
/// independently — the filename is the single source of truth.
/// `Unknown` yields empty operation lists in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Pdf,
    Word,
    Excel,
    Powerpoint,
    Jpg,
    Png,
    Gif,
    Text,
    Unknown,
}

impl FileFormat {
    /// Resolve a filename to its format tag.
    ///
    /// Takes the substring after the last `.`, lower-cased, and maps it
    /// via a fixed extension table. A missing extension resolves to
    /// [`FileFormat::Unknown`].
    pub fn from_filename(name: &str) -> Self {
        let ext = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
            // ".gitignore"-style names and extension-less names alike
            _ => return FileFormat::Unknown,
        };

        match ext.as_str() {
            "pdf" => FileFormat::Pdf,
            "doc" | "docx" => FileFormat::Word,
            "xls" | "xlsx" => FileFormat::Excel,
            "ppt" | "pptx" => FileFormat::Powerpoint,
            "jpg" | "jpeg" => FileFormat::Jpg,
            "png" => FileFormat::Png,
            "gif" => FileFormat::Gif,
            "txt" => FileFormat::Text,
            _ => FileFormat::Unknown,
        }
    }

    /// Media type attached to the multipart part for a file of this format.
    ///
    /// Coarse by design — the backend dispatches on `conversion_type`,
    /// not the part's content type.
    pub fn media_type(&self) -> &'static str {
        match self {
            FileFormat::Pdf => "application/pdf",
            FileFormat::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            FileFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            FileFormat::Powerpoint => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            FileFormat::Jpg => "image/jpeg",
            FileFormat::Png => "image/png",
            FileFormat::Gif => "image/gif",
            FileFormat::Text => "text/plain",
            FileFormat::Unknown => "application/octet-stream",
        }
    }

    /// True for the raster image formats (the batch table treats them as
    /// one family).
    pub fn is_raster_image(&self) -> bool {
        matches!(self, FileFormat::Jpg | FileFormat::Png | FileFormat::Gif)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileFormat::Pdf => "pdf",
            FileFormat::Word => "word",
            FileFormat::Excel => "excel",
            FileFormat::Powerpoint => "powerpoint",
            FileFormat::Jpg => "jpg",
            FileFormat::Png => "png",
            FileFormat::Gif => "gif",
            FileFormat::Text => "text",
            FileFormat::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_documented_extensions() {
        assert_eq!(FileFormat::from_filename("report.pdf"), FileFormat::Pdf);
        assert_eq!(FileFormat::from_filename("notes.doc"), FileFormat::Word);
        assert_eq!(FileFormat::from_filename("notes.docx"), FileFormat::Word);
        assert_eq!(FileFormat::from_filename("sheet.xls"), FileFormat::Excel);
        assert_eq!(FileFormat::from_filename("sheet.xlsx"), FileFormat::Excel);
        assert_eq!(FileFormat::from_filename("deck.ppt"), FileFormat::Powerpoint);
        assert_eq!(FileFormat::from_filename("deck.pptx"), FileFormat::Powerpoint);
        assert_eq!(FileFormat::from_filename("photo.jpg"), FileFormat::Jpg);
        assert_eq!(FileFormat::from_filename("photo.jpeg"), FileFormat::Jpg);
        assert_eq!(FileFormat::from_filename("icon.png"), FileFormat::Png);
        assert_eq!(FileFormat::from_filename("anim.gif"), FileFormat::Gif);
        assert_eq!(FileFormat::from_filename("readme.txt"), FileFormat::Text);
    }

    #[test]
    fn resolution_is_case_insensitive() {
        assert_eq!(FileFormat::from_filename("REPORT.PDF"), FileFormat::Pdf);
        assert_eq!(FileFormat::from_filename("Photo.JpEg"), FileFormat::Jpg);
        assert_eq!(FileFormat::from_filename("NOTES.Docx"), FileFormat::Word);
    }

    #[test]
    fn unrecognised_or_missing_extension_is_unknown() {
        assert_eq!(FileFormat::from_filename("archive.zip"), FileFormat::Unknown);
        assert_eq!(FileFormat::from_filename("noextension"), FileFormat::Unknown);
        assert_eq!(FileFormat::from_filename(""), FileFormat::Unknown);
        assert_eq!(FileFormat::from_filename(".gitignore"), FileFormat::Unknown);
    }

    #[test]
    fn last_extension_wins() {
        assert_eq!(FileFormat::from_filename("report.pdf.png"), FileFormat::Png);
        assert_eq!(FileFormat::from_filename("a.b.c.pdf"), FileFormat::Pdf);
    }

    #[test]
    fn raster_image_family() {
        assert!(FileFormat::Jpg.is_raster_image());
        assert!(FileFormat::Png.is_raster_image());
        assert!(FileFormat::Gif.is_raster_image());
        assert!(!FileFormat::Pdf.is_raster_image());
        assert!(!FileFormat::Text.is_raster_image());
    }
}
