//! Operation-specific parameters and their validation.
//!
//! Parameters live in one struct regardless of the selected operation;
//! applicability is decided at submit time so a user can, say, type a
//! password, switch operations, and switch back without losing it.
//! [`ConversionParameters::validate_for`] enforces the rule that matters
//! on the wire: parameters irrelevant to the operation are never sent,
//! and required ones are present and well-formed before any network
//! traffic happens.

use crate::catalog::Operation;
use crate::error::ConvertError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Inclusive bounds for the compression level accepted by the backend.
pub const COMPRESSION_LEVEL_MIN: u8 = 10;
pub const COMPRESSION_LEVEL_MAX: u8 = 100;

/// Default compression level when the caller never set one.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 70;

/// The page-range grammar: `N(-M)?(,N(-M)?)*`.
static SPLIT_RANGES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(-\d+)?(,\d+(-\d+)?)*$").expect("split-range regex"));

/// Auxiliary input for the currently selected operation.
///
/// Only the fields relevant to the operation are validated and sent;
/// the rest are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionParameters {
    /// JPEG/PDF quality, 10–100. Sent for compression-class operations.
    pub compression_level: Option<u8>,
    /// Password for protect/unlock operations.
    pub password: Option<String>,
    /// Page ranges for split, e.g. `1-3,7,9-12` (1-indexed, inclusive).
    pub split_ranges: Option<String>,
}

impl ConversionParameters {
    /// Validate this parameter set against an operation.
    ///
    /// Returns the subset that will actually be sent. Irrelevant fields
    /// are dropped rather than rejected; required-but-missing or
    /// out-of-range fields fail with
    /// [`ConvertError::InvalidParameters`].
    pub fn validate_for(&self, operation: Operation) -> Result<AppliedParameters, ConvertError> {
        let mut applied = AppliedParameters::default();

        if operation.is_compression() {
            let level = self.compression_level.unwrap_or(DEFAULT_COMPRESSION_LEVEL);
            if !(COMPRESSION_LEVEL_MIN..=COMPRESSION_LEVEL_MAX).contains(&level) {
                return Err(ConvertError::InvalidParameters {
                    operation: operation.identifier().to_string(),
                    detail: format!(
                        "compression level must be {COMPRESSION_LEVEL_MIN}–{COMPRESSION_LEVEL_MAX}, got {level}"
                    ),
                });
            }
            applied.compression_level = Some(level);
        }

        if operation.requires_password() {
            match self.password.as_deref() {
                Some(p) if !p.is_empty() => applied.password = Some(p.to_string()),
                _ => {
                    return Err(ConvertError::InvalidParameters {
                        operation: operation.identifier().to_string(),
                        detail: "a non-empty password is required".to_string(),
                    })
                }
            }
        }

        if operation.requires_split_ranges() {
            let raw = self.split_ranges.as_deref().unwrap_or("");
            validate_split_ranges(raw).map_err(|detail| ConvertError::InvalidParameters {
                operation: operation.identifier().to_string(),
                detail,
            })?;
            applied.split_ranges = Some(raw.to_string());
        }

        Ok(applied)
    }
}

/// The validated, operation-applicable subset of parameters — exactly
/// what goes on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedParameters {
    pub compression_level: Option<u8>,
    pub password: Option<String>,
    pub split_ranges: Option<String>,
}

/// Check a split-range string against the grammar and its semantics.
///
/// The grammar accepts `3-1`; the backend would produce an empty
/// document for it, so reversed ranges and page 0 are rejected here
/// where the user can still fix them.
pub fn validate_split_ranges(raw: &str) -> Result<(), String> {
    if raw.is_empty() {
        return Err("split ranges are required (e.g. '1-3,7')".to_string());
    }
    if !SPLIT_RANGES_RE.is_match(raw) {
        return Err(format!(
            "'{raw}' does not match the page-range grammar N(-M)?(,N(-M)?)*"
        ));
    }
    for part in raw.split(',') {
        let (start, end) = match part.split_once('-') {
            Some((s, e)) => {
                let s: u32 = s.parse().map_err(|_| format!("page number '{s}' too large"))?;
                let e: u32 = e.parse().map_err(|_| format!("page number '{e}' too large"))?;
                (s, e)
            }
            None => {
                let p: u32 = part
                    .parse()
                    .map_err(|_| format!("page number '{part}' too large"))?;
                (p, p)
            }
        };
        if start == 0 {
            return Err("pages are 1-indexed, minimum is 1".to_string());
        }
        if start > end {
            return Err(format!("range '{part}': start must be <= end"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_ranges_grammar_accepts() {
        for ok in ["1", "1-3", "1,3,5-7", "10-20,25", "2,2,2"] {
            assert!(validate_split_ranges(ok).is_ok(), "'{ok}' should parse");
        }
    }

    #[test]
    fn split_ranges_grammar_rejects() {
        for bad in ["", "1-", "-3", "a", "1,,2", "1 - 3", "1;2", "3-1", "0", "0-2"] {
            assert!(validate_split_ranges(bad).is_err(), "'{bad}' should fail");
        }
    }

    #[test]
    fn compression_defaults_and_bounds() {
        let params = ConversionParameters::default();
        let applied = params.validate_for(Operation::PdfCompress).unwrap();
        assert_eq!(applied.compression_level, Some(DEFAULT_COMPRESSION_LEVEL));

        let params = ConversionParameters {
            compression_level: Some(9),
            ..Default::default()
        };
        assert!(params.validate_for(Operation::ImageCompress).is_err());

        let params = ConversionParameters {
            compression_level: Some(100),
            ..Default::default()
        };
        assert_eq!(
            params
                .validate_for(Operation::BatchCompress)
                .unwrap()
                .compression_level,
            Some(100)
        );
    }

    #[test]
    fn password_required_for_protect_and_unlock_only() {
        let empty = ConversionParameters::default();
        assert!(empty.validate_for(Operation::PdfProtect).is_err());
        assert!(empty.validate_for(Operation::PdfUnlock).is_err());

        let with_pw = ConversionParameters {
            password: Some("hunter2".into()),
            ..Default::default()
        };
        let applied = with_pw.validate_for(Operation::PdfProtect).unwrap();
        assert_eq!(applied.password.as_deref(), Some("hunter2"));

        let blank_pw = ConversionParameters {
            password: Some(String::new()),
            ..Default::default()
        };
        assert!(blank_pw.validate_for(Operation::PdfUnlock).is_err());
    }

    #[test]
    fn irrelevant_parameters_are_dropped_not_sent() {
        let params = ConversionParameters {
            compression_level: Some(70),
            password: Some("secret".into()),
            split_ranges: Some("1-3".into()),
        };
        let applied = params.validate_for(Operation::PdfToDocx).unwrap();
        assert_eq!(applied, AppliedParameters::default());

        // A compression op keeps only the level.
        let applied = params.validate_for(Operation::ImageCompress).unwrap();
        assert_eq!(applied.compression_level, Some(70));
        assert!(applied.password.is_none());
        assert!(applied.split_ranges.is_none());
    }

    #[test]
    fn split_requires_ranges() {
        let empty = ConversionParameters::default();
        assert!(empty.validate_for(Operation::SplitPdf).is_err());

        let with_ranges = ConversionParameters {
            split_ranges: Some("1-3,7".into()),
            ..Default::default()
        };
        let applied = with_ranges.validate_for(Operation::SplitPdf).unwrap();
        assert_eq!(applied.split_ranges.as_deref(), Some("1-3,7"));
    }
}
