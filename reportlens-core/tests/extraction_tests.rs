//! Extraction boundary tests: documents in, page text out.
//!
//! Fixtures are generated in-test (lopdf for PDF, zip for DOCX) so the
//! suite needs no binary files checked in.

use reportlens_core::{DocumentProcessor, ReportError, ReportType, ServiceConfig, TextExtractor};
use std::io::{Cursor, Write};

// ============================================================================
// Fixture builders
// ============================================================================

#[cfg(feature = "pdf-backend")]
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[cfg(feature = "docx-backend")]
fn build_docx(pages: &[&str]) -> Vec<u8> {
    let body: String = pages
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let page_break = if i + 1 < pages.len() {
                r#"<w:r><w:br w:type="page"/></w:r>"#
            } else {
                ""
            };
            format!("<w:p><w:r><w:t xml:space=\"preserve\">{text}</w:t></w:r>{page_break}</w:p>")
        })
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("[Content_Types].xml", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(br#"<?xml version="1.0"?><Types/>"#).unwrap();
    writer
        .start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn processor() -> DocumentProcessor {
    DocumentProcessor::new(ServiceConfig::default()).unwrap()
}

// ============================================================================
// PDF
// ============================================================================

#[cfg(feature = "pdf-backend")]
mod pdf {
    use super::*;
    use reportlens_core::PdfExtractor;

    #[test]
    fn second_page_text_is_extracted() {
        let bytes = build_pdf(&["Cover sheet", "83% Overall Similarity"]);
        let text = PdfExtractor::new().page_text(&bytes, 1).unwrap().unwrap();
        assert!(text.contains("83% Overall Similarity"), "got {text:?}");
    }

    #[test]
    fn missing_page_is_none() {
        let bytes = build_pdf(&["Only page"]);
        assert_eq!(PdfExtractor::new().page_text(&bytes, 1).unwrap(), None);
    }

    #[test]
    fn full_text_covers_every_page() {
        let bytes = build_pdf(&["alpha beta", "gamma"]);
        let text = PdfExtractor::new().full_text(&bytes).unwrap();
        assert!(text.contains("alpha beta"));
        assert!(text.contains("gamma"));
    }

    #[test]
    fn upload_is_classified_from_page_two() {
        let bytes = build_pdf(&["15% detected as AI", "40% Overall Similarity 8*% detected as AI"]);
        let result = processor().classify_bytes("report.pdf", &bytes).unwrap();
        assert_eq!(result.report_type(), ReportType::PlagiarismAndAiDetectionReport);
        assert_eq!(result.overall_similarity(), Some(40));
        assert_eq!(result.ai_detection_value(), Some(8));
        assert!(result.ai_detection_asterisk());
    }

    #[test]
    fn single_page_upload_is_missing_page() {
        let bytes = build_pdf(&["83% Overall Similarity"]);
        let err = processor().classify_bytes("report.pdf", &bytes).unwrap_err();
        assert!(matches!(err, ReportError::MissingPage));
    }

    #[test]
    fn corrupt_pdf_is_missing_page() {
        let err = processor()
            .classify_bytes("report.pdf", b"%PDF-1.4 truncated")
            .unwrap_err();
        assert!(matches!(err, ReportError::MissingPage));
    }

    #[test]
    fn words_are_counted() {
        let bytes = build_pdf(&["one two three", "four five"]);
        let result = processor().count_words_bytes("essay.pdf", &bytes).unwrap();
        assert_eq!(result.word_count, 5);
    }
}

// ============================================================================
// DOCX
// ============================================================================

#[cfg(feature = "docx-backend")]
mod docx {
    use super::*;
    use reportlens_core::DocxExtractor;

    #[test]
    fn page_break_delimits_second_page() {
        let bytes = build_docx(&["Cover", "*% detected as AI"]);
        let text = DocxExtractor::new().page_text(&bytes, 1).unwrap();
        assert_eq!(text.as_deref(), Some("*% detected as AI"));
    }

    #[test]
    fn upload_is_classified_from_page_two() {
        let bytes = build_docx(&["Cover", "*% detected as AI"]);
        let result = processor().classify_bytes("report.docx", &bytes).unwrap();
        assert_eq!(result.report_type(), ReportType::AiDetectionReport);
        assert!(result.below_threshold());
    }

    #[test]
    fn document_without_breaks_has_one_page() {
        let bytes = build_docx(&["73% Overall Similarity"]);
        let err = processor().classify_bytes("report.docx", &bytes).unwrap_err();
        assert!(matches!(err, ReportError::MissingPage));
    }

    #[test]
    fn zip_without_document_part_is_an_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("readme.txt", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"hello").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(DocxExtractor::new().full_text(&bytes).is_err());
    }

    #[test]
    fn words_are_counted_across_pages() {
        let bytes = build_docx(&["The quick brown", "fox jumps"]);
        let result = processor().count_words_bytes("essay.docx", &bytes).unwrap();
        assert_eq!(result.word_count, 5);
    }
}

// ============================================================================
// Plain text
// ============================================================================

mod text {
    use super::*;

    #[test]
    fn upload_is_classified_from_page_two() {
        let result = processor()
            .classify_bytes("report.txt", "cover\u{000C}15% detected as AI".as_bytes())
            .unwrap();
        assert_eq!(result.report_type(), ReportType::AiDetectionReport);
        assert_eq!(result.ai_detection_value(), Some(15));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let result = processor()
            .count_words_bytes("essay.txt", b"caf\xE9 au lait")
            .unwrap();
        assert_eq!(result.word_count, 3);
    }
}
