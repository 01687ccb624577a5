//! PDF extractor
//!
//! Decodes PDFs in memory with `lopdf` and pulls the text operators of the
//! requested page. Image-only (scanned) pages come back empty; no OCR is
//! performed.

use super::traits::{has_extension, TextExtractor};
use anyhow::{anyhow, Result};
use lopdf::Document;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn load(bytes: &[u8]) -> Result<Document> {
        Document::load_mem(bytes).map_err(|e| anyhow!("PDF parsing error: {e}"))
    }
}

impl TextExtractor for PdfExtractor {
    fn page_text(&self, bytes: &[u8], page_index: usize) -> Result<Option<String>> {
        let document = Self::load(bytes)?;

        // lopdf numbers pages from 1
        let page_number = u32::try_from(page_index + 1)?;
        if !document.get_pages().contains_key(&page_number) {
            tracing::debug!(page_number, "PDF has no such page");
            return Ok(None);
        }

        let text = document
            .extract_text(&[page_number])
            .map_err(|e| anyhow!("Failed to extract text from page {page_number}: {e}"))?;
        Ok(Some(text))
    }

    fn full_text(&self, bytes: &[u8]) -> Result<String> {
        let document = Self::load(bytes)?;
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Ok(String::new());
        }

        document
            .extract_text(&page_numbers)
            .map_err(|e| anyhow!("Failed to extract PDF text: {e}"))
    }

    fn name(&self) -> &str {
        "PdfExtractor"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, "pdf")
    }
}
