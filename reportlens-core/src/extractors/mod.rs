//! Text Extractors
//!
//! This module provides the extraction layer that turns uploaded documents
//! into plain text for the report classifier and the word counter.
//!
//! ## Architecture
//!
//! ```text
//! Upload (PDF, DOCX, TXT)
//!     ↓
//! [Format-specific TextExtractor]
//!     ↓
//! Page text / full text
//!     ↓
//! [ReportClassifier] or [count_words]
//! ```
//!
//! ## Available Extractors
//!
//! - `PdfExtractor` - PDF documents via lopdf (`pdf-backend` feature)
//! - `DocxExtractor` - Word documents via zip + quick-xml (`docx-backend` feature)
//! - `PlainTextExtractor` - UTF-8 text, always available

pub mod traits;
pub mod text;

#[cfg(feature = "pdf-backend")]
pub mod pdf;

#[cfg(feature = "docx-backend")]
pub mod docx;

use crate::types::DocumentFormat;
use anyhow::Result;
use std::path::Path;

// Re-export main types
pub use text::PlainTextExtractor;
pub use traits::TextExtractor;

#[cfg(feature = "pdf-backend")]
pub use pdf::PdfExtractor;

#[cfg(feature = "docx-backend")]
pub use docx::DocxExtractor;

/// Extractor enum for runtime format selection
pub enum ExtractorImpl {
    #[cfg(feature = "pdf-backend")]
    Pdf(PdfExtractor),
    #[cfg(feature = "docx-backend")]
    Docx(DocxExtractor),
    Text(PlainTextExtractor),
}

impl ExtractorImpl {
    /// Pick the extractor for a format, if its backend is compiled in
    pub fn for_format(format: DocumentFormat) -> Option<Self> {
        match format {
            #[cfg(feature = "pdf-backend")]
            DocumentFormat::Pdf => Some(Self::Pdf(PdfExtractor::new())),
            #[cfg(feature = "docx-backend")]
            DocumentFormat::Docx => Some(Self::Docx(DocxExtractor::new())),
            DocumentFormat::Text => Some(Self::Text(PlainTextExtractor::new())),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    fn inner(&self) -> &dyn TextExtractor {
        match self {
            #[cfg(feature = "pdf-backend")]
            ExtractorImpl::Pdf(extractor) => extractor,
            #[cfg(feature = "docx-backend")]
            ExtractorImpl::Docx(extractor) => extractor,
            ExtractorImpl::Text(extractor) => extractor,
        }
    }
}

impl TextExtractor for ExtractorImpl {
    fn page_text(&self, bytes: &[u8], page_index: usize) -> Result<Option<String>> {
        self.inner().page_text(bytes, page_index)
    }

    fn full_text(&self, bytes: &[u8]) -> Result<String> {
        self.inner().full_text(bytes)
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        self.inner().supports_file_type(path)
    }
}
