//! Error types for termica operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering a heatmap.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Dataset parse error (malformed JSON or missing fields).
    #[error("dataset parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid dimensions for a framebuffer, chart, or plot area.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Empty dataset provided where records are required.
    #[error("empty dataset")]
    EmptyData,

    /// A record carries a month outside 1..=12.
    #[error("invalid record: year {year} has month {month} (expected 1..=12)")]
    InvalidRecord {
        /// Year of the offending record.
        year: i32,
        /// Out-of-range month value.
        month: u32,
    },

    /// Temperature range unusable for bucket classification.
    #[error("degenerate temperature range: min {min}, max {max}")]
    DegenerateRange {
        /// Lower bound of the range.
        min: f64,
        /// Upper bound of the range.
        max: f64,
    },

    /// Scale domain error (e.g., equal domain endpoints).
    #[error("scale domain error: {0}")]
    ScaleDomain(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions { width: 0, height: 100 };
        assert!(err.to_string().contains("invalid dimensions"));
    }

    #[test]
    fn test_invalid_record_display() {
        let err = Error::InvalidRecord { year: 1900, month: 13 };
        assert!(err.to_string().contains("1900"));
        assert!(err.to_string().contains("13"));
    }

    #[test]
    fn test_degenerate_range_display() {
        let err = Error::DegenerateRange { min: 5.0, max: 5.0 };
        assert!(err.to_string().contains("degenerate"));
    }
}
