//! Error taxonomy for report processing.
//!
//! Free-text oddities never surface here: text that matches neither report
//! pattern is classified as `Unknown`. These variants cover missing input
//! and the upload plumbing around the classifier.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Document does not have the required page, or its text could not be extracted.")]
    MissingPage,

    #[error("Uploaded file is empty.")]
    EmptyUpload,

    #[error("File too large: {size} bytes (limit {limit} bytes).")]
    UploadTooLarge { size: usize, limit: usize },

    #[error("Unsupported file extension '{extension}'. Allowed: {allowed}.")]
    UnsupportedExtension { extension: String, allowed: String },

    #[error("Could not extract text: {0}")]
    Extraction(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
