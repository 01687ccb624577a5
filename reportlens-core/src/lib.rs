// Reportlens Core Library
//
// Reads similarity / AI-detection reports out of uploaded documents and
// counts words. Extraction is pluggable per format; classification is a pure
// function of the report page text.

pub mod types;
pub mod error;
pub mod extractors;
pub mod classifier;
pub mod word_count;
pub mod config;
pub mod staging;
pub mod processor;

// Re-export main types and functions for easy use
pub use types::*;
pub use error::{ReportError, ReportResult};
pub use extractors::{ExtractorImpl, PlainTextExtractor, TextExtractor};
pub use classifier::ReportClassifier;
pub use word_count::count_words;
pub use config::ServiceConfig;
pub use processor::DocumentProcessor;

// Re-export backends for direct use
#[cfg(feature = "pdf-backend")]
pub use extractors::PdfExtractor;
#[cfg(feature = "docx-backend")]
pub use extractors::DocxExtractor;
