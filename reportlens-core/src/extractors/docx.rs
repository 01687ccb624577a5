//! DOCX extractor
//!
//! A DOCX file is a zip container; the body lives in `word/document.xml` as
//! WordprocessingML. Text comes from `<w:t>` runs. DOCX has no fixed page
//! layout, so pages are delimited by the break markers Word writes:
//! explicit `<w:br w:type="page"/>`, the `<w:pageBreakBefore/>` paragraph
//! property, and `<w:lastRenderedPageBreak/>` left behind by the last
//! layout pass.

use super::traits::{has_extension, TextExtractor};
use anyhow::{anyhow, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Read the main document part out of the zip container
    fn document_xml(bytes: &[u8]) -> Result<String> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|e| anyhow!("Invalid DOCX/ZIP file: {e}"))?;
        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|_| anyhow!("No {DOCUMENT_PART} found in DOCX"))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .with_context(|| format!("Cannot read {DOCUMENT_PART}"))?;
        Ok(xml)
    }

    fn pages(bytes: &[u8]) -> Result<Vec<String>> {
        let xml = Self::document_xml(bytes)?;
        parse_pages(&xml)
    }
}

impl TextExtractor for DocxExtractor {
    fn page_text(&self, bytes: &[u8], page_index: usize) -> Result<Option<String>> {
        Ok(Self::pages(bytes)?.into_iter().nth(page_index))
    }

    fn full_text(&self, bytes: &[u8]) -> Result<String> {
        Ok(Self::pages(bytes)?.join("\n"))
    }

    fn name(&self) -> &str {
        "DocxExtractor"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, "docx")
    }
}

/// Accumulates run text into pages while walking the XML events
struct PageCollector {
    pages: Vec<String>,
    // set by a break, cleared once real text arrives; Word often writes an
    // explicit break and a rendered-break marker for the same boundary
    just_broke: bool,
}

impl PageCollector {
    fn new() -> Self {
        Self {
            pages: vec![String::new()],
            just_broke: false,
        }
    }

    fn current(&mut self) -> &mut String {
        // pages always holds at least one entry
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn push_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.just_broke = false;
        }
        self.current().push_str(text);
    }

    fn push_char(&mut self, c: char) {
        self.current().push(c);
    }

    fn page_break(&mut self) {
        if self.just_broke && self.current().trim().is_empty() {
            return;
        }
        self.pages.push(String::new());
        self.just_broke = true;
    }

    fn at_start(&self) -> bool {
        self.pages.len() == 1 && self.pages[0].trim().is_empty()
    }

    fn finish(self) -> Vec<String> {
        self.pages
            .into_iter()
            .map(|page| page.trim_matches('\n').to_string())
            .collect()
    }
}

/// `<w:pageBreakBefore/>` is on unless `w:val` turns it off
fn is_toggle_on(element: &BytesStart<'_>) -> Result<bool> {
    Ok(match element.try_get_attribute("w:val")? {
        Some(attr) => !matches!(attr.value.as_ref(), b"false" | b"0" | b"off"),
        None => true,
    })
}

fn is_page_break(element: &BytesStart<'_>) -> Result<bool> {
    Ok(element
        .try_get_attribute("w:type")?
        .is_some_and(|attr| attr.value.as_ref() == b"page"))
}

/// Split WordprocessingML into per-page plain text
fn parse_pages(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut collector = PageCollector::new();
    let mut in_text_run = false;
    // <w:tab/> inside paragraph properties is a tab stop, not a tab character
    let mut in_paragraph_props = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:pPr" => in_paragraph_props = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:pPr" => in_paragraph_props = false,
                b"w:p" => collector.push_char('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" if !in_paragraph_props => collector.push_char('\t'),
                b"w:pageBreakBefore" if in_paragraph_props => {
                    // no blank leading page when the first paragraph carries it
                    if is_toggle_on(&e)? && !collector.at_start() {
                        collector.page_break();
                    }
                }
                b"w:br" => {
                    if is_page_break(&e)? {
                        collector.page_break();
                    } else {
                        collector.push_char('\n');
                    }
                }
                b"w:cr" => collector.push_char('\n'),
                b"w:lastRenderedPageBreak" => collector.page_break(),
                _ => {}
            },
            Event::Text(t) if in_text_run => collector.push_text(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(collector.finish())
}
