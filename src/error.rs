//! Error types for the glyph redaction library.
//!
//! Errors are categorized by source and carry the path, pattern or page
//! number needed to act on them. "No match" is never an error; only
//! malformed configuration, missing resources and unsupported layouts are.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for redaction operations.
pub type RedactorResult<T> = Result<T, RedactorError>;

/// Error type for all location, persistence and mask application operations.
#[derive(Debug, Error)]
pub enum RedactorError {
    /// Error occurred while reading or writing files
    #[error("IO error for path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Source document or plan file does not exist
    #[error("Document not found: '{}'", .path.display())]
    DocumentNotFound { path: PathBuf },

    /// A saved plan exists but could not be parsed
    #[error("Invalid redaction plan '{}': {reason}", .path.display())]
    InvalidPlan { path: PathBuf, reason: String },

    /// Pattern compilation error (one per offending rule)
    #[error("Pattern error for '{pattern}': {reason}")]
    PatternError { pattern: String, reason: String },

    /// Invalid configuration or parameters
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },

    /// A region targets a rotated page; coordinates cannot be applied safely
    #[error("Unsupported rotation {rotation} on page {page}: only unrotated pages can be masked")]
    UnsupportedRotation { page: usize, rotation: i32 },

    /// Error occurred during PDF processing
    #[error("{}", pdf_processing_message(.message, .page))]
    PdfProcessing {
        message: String,
        page: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Backend-specific error (MuPDF, LoPDF, etc.)
    #[error("{backend} backend error: {message}")]
    BackendError {
        backend: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn pdf_processing_message(message: &str, page: &Option<usize>) -> String {
    match page {
        Some(p) => format!("PDF processing error on page {}: {}", p, message),
        None => format!("PDF processing error: {}", message),
    }
}

impl RedactorError {
    /// Wraps a MuPDF failure with the operation that triggered it.
    pub(crate) fn mupdf(message: impl Into<String>, err: mupdf::Error) -> Self {
        Self::BackendError {
            backend: "MuPDF".to_string(),
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }

    /// Returns true when the failure is a missing document or plan.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DocumentNotFound { .. })
    }
}

impl From<regex::Error> for RedactorError {
    fn from(err: regex::Error) -> Self {
        Self::PatternError {
            pattern: "<unknown>".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<lopdf::Error> for RedactorError {
    fn from(err: lopdf::Error) -> Self {
        Self::BackendError {
            backend: "LoPDF".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
