//! Plain text extractor
//!
//! Text files have no page model; form feeds (`\x0C`) are treated as page
//! breaks, which is what `pdftotext` and most print spoolers emit.

use super::traits::{has_extension, TextExtractor};
use anyhow::Result;
use std::path::Path;

const FORM_FEED: char = '\x0C';

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn decode(bytes: &[u8]) -> String {
        let text = String::from_utf8_lossy(bytes);
        // Strip a UTF-8 BOM left by Windows editors
        text.strip_prefix('\u{FEFF}').unwrap_or(&text).to_string()
    }
}

impl TextExtractor for PlainTextExtractor {
    fn page_text(&self, bytes: &[u8], page_index: usize) -> Result<Option<String>> {
        let text = Self::decode(bytes);
        Ok(text.split(FORM_FEED).nth(page_index).map(str::to_string))
    }

    fn full_text(&self, bytes: &[u8]) -> Result<String> {
        Ok(Self::decode(bytes).replace(FORM_FEED, "\n"))
    }

    fn name(&self) -> &str {
        "PlainTextExtractor"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, "txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_feed_splits_pages() {
        let bytes = b"cover page\x0C40% Overall Similarity\x0Cappendix";
        let extractor = PlainTextExtractor::new();
        assert_eq!(
            extractor.page_text(bytes, 1).unwrap().as_deref(),
            Some("40% Overall Similarity")
        );
        assert_eq!(extractor.page_text(bytes, 3).unwrap(), None);
    }

    #[test]
    fn single_page_file_has_no_second_page() {
        let extractor = PlainTextExtractor::new();
        assert_eq!(extractor.page_text(b"only page", 1).unwrap(), None);
        assert_eq!(extractor.page_text(b"only page", 0).unwrap().as_deref(), Some("only page"));
    }

    #[test]
    fn full_text_drops_bom_and_form_feeds() {
        let text = PlainTextExtractor::new()
            .full_text("\u{FEFF}one\x0Ctwo".as_bytes())
            .unwrap();
        assert_eq!(text, "one\ntwo");
    }

    #[test]
    fn supports_txt_only() {
        let extractor = PlainTextExtractor::new();
        assert!(extractor.supports_file_type(Path::new("notes.TXT")));
        assert!(!extractor.supports_file_type(Path::new("notes.md")));
    }
}
