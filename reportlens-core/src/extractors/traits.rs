// Text extraction abstraction
//
// This module defines the boundary between document decoding (bytes -> text)
// and report interpretation (text -> ClassificationResult). Everything after
// this point works with plain strings and is format-agnostic.

use anyhow::Result;
use std::path::Path;

/// TextExtractor trait - turns document bytes into plain text
///
/// Implementations handle one container format each (PDF, DOCX, plain text).
/// Page indices are 0-based.
pub trait TextExtractor: Send + Sync {
    /// Text of a single page
    ///
    /// `Ok(None)` means the document is readable but has no such page.
    /// `Err` means the document itself could not be decoded.
    fn page_text(&self, bytes: &[u8], page_index: usize) -> Result<Option<String>>;

    /// Text of the whole document body
    fn full_text(&self, bytes: &[u8]) -> Result<String>;

    /// Convenience method: page text from a staged file
    fn page_text_from_file(&self, path: &Path, page_index: usize) -> Result<Option<String>> {
        let bytes = std::fs::read(path)?;
        self.page_text(&bytes, page_index)
    }

    /// Convenience method: full text from a staged file
    fn full_text_from_file(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        self.full_text(&bytes)
    }

    /// Extractor name for logging
    fn name(&self) -> &str;

    /// Check if extractor supports the given file type
    fn supports_file_type(&self, path: &Path) -> bool;
}

/// Case-insensitive extension check shared by the extractors
pub(crate) fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}
