//! Unified error types for chatlens.
//!
//! Only two things can make a parse fail: the file cannot be read at all, or
//! its bytes cannot be decoded as text. Everything else the parser meets
//! (unknown header shapes, impossible dates, orphan lines, system notices)
//! is recovered from and counted in [`ParseStats`](crate::parser::ParseStats)
//! instead of being raised.
//!
//! The remaining variants belong to the outer surfaces: date filters,
//! output format selection and the CSV/JSON writers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::Message;
///
/// fn load() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input could not be decoded as text in any supported encoding.
    ///
    /// This is the only fatal parse failure. The decoder tries UTF-8 first
    /// and a byte-order-mark driven UTF-16 retry second.
    #[error("Failed to decode chat log{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Decode {
        /// The file path, if the bytes came from a file
        path: Option<PathBuf>,
        /// Why the last decoding attempt failed
        #[source]
        source: DecodeErrorKind,
    },

    /// Invalid date in filter or parser configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An output format or file extension is not recognized.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What was being selected (e.g. "output")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a byte buffer could not be turned into text.
#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    /// Not valid UTF-8 and no UTF-16 byte-order mark to retry with.
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Marked as UTF-16 but contains an unpaired surrogate.
    #[error("invalid UTF-16: {0}")]
    Utf16(#[from] std::char::DecodeUtf16Error),

    /// Marked as UTF-16 but has an odd number of bytes.
    #[error("truncated UTF-16 input ({len} bytes)")]
    TruncatedUtf16 {
        /// Total length of the input in bytes
        len: usize,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a decode error.
    pub fn decode(source: DecodeErrorKind, path: Option<PathBuf>) -> Self {
        ChatlensError::Decode { path, source }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if the input could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, ChatlensError::Decode { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatlensError::InvalidFormat { .. })
    }
}
