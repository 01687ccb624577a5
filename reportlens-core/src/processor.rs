use crate::classifier::ReportClassifier;
use crate::config::ServiceConfig;
use crate::error::{ReportError, ReportResult};
use crate::extractors::{ExtractorImpl, TextExtractor};
use crate::staging::UploadStaging;
use crate::types::*;
use crate::word_count::count_words;
use std::path::Path;
use std::time::Instant;

/// Upload pipeline: validate → stage → extract → classify / count.
///
/// Holds only immutable state, so a single instance is shared across
/// request handlers behind an `Arc`.
pub struct DocumentProcessor {
    config: ServiceConfig,
    classifier: ReportClassifier,
    staging: UploadStaging,
}

impl DocumentProcessor {
    pub fn new(config: ServiceConfig) -> ReportResult<Self> {
        let staging = UploadStaging::new(config.staging_dir.clone())?;
        Ok(Self {
            config,
            classifier: ReportClassifier::new(),
            staging,
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Map a file name to a supported format, honouring the configured allow-list
    pub fn resolve_format(&self, filename: &str) -> ReportResult<DocumentFormat> {
        let extension = file_extension(filename).unwrap_or_default();

        let format = if self.config.is_extension_allowed(&extension) {
            DocumentFormat::from_extension(&extension)
        } else {
            None
        };

        format.ok_or_else(|| ReportError::UnsupportedExtension {
            extension,
            allowed: self.config.allowed_extensions.join(", "),
        })
    }

    /// Reject empty, wrongly typed and oversized uploads, in that order
    pub fn validate_upload(&self, filename: &str, bytes: &[u8]) -> ReportResult<DocumentFormat> {
        if bytes.is_empty() {
            return Err(ReportError::EmptyUpload);
        }
        let format = self.resolve_format(filename)?;
        self.check_size(bytes.len())?;
        Ok(format)
    }

    fn check_size(&self, size: usize) -> ReportResult<()> {
        if size == 0 {
            return Err(ReportError::EmptyUpload);
        }
        if size > self.config.max_upload_bytes {
            return Err(ReportError::UploadTooLarge {
                size,
                limit: self.config.max_upload_bytes,
            });
        }
        Ok(())
    }

    /// Classify the report page of an uploaded document
    pub fn classify_bytes(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> ReportResult<ClassificationResult> {
        let format = self.validate_upload(filename, bytes)?;
        let staged = self.staging.stage(format.extension(), bytes)?;
        self.classify_path(format, staged.path())
    }

    /// Count the words of an uploaded document
    pub fn count_words_bytes(&self, filename: &str, bytes: &[u8]) -> ReportResult<WordCountResult> {
        let format = self.validate_upload(filename, bytes)?;
        let staged = self.staging.stage(format.extension(), bytes)?;
        self.count_words_path(filename, format, staged.path())
    }

    /// Classify a document already on disk
    pub fn classify_file(&self, path: &Path) -> ReportResult<ClassificationResult> {
        let format = self.validate_file(path)?;
        self.classify_path(format, path)
    }

    /// Count the words of a document already on disk
    pub fn count_words_file(&self, path: &Path) -> ReportResult<WordCountResult> {
        let format = self.validate_file(path)?;
        let filename = display_name(path);
        self.count_words_path(&filename, format, path)
    }

    fn validate_file(&self, path: &Path) -> ReportResult<DocumentFormat> {
        let format = self.resolve_format(&display_name(path))?;
        let size = std::fs::metadata(path)?.len();
        self.check_size(usize::try_from(size).unwrap_or(usize::MAX))?;
        Ok(format)
    }

    fn extractor(&self, format: DocumentFormat) -> ReportResult<ExtractorImpl> {
        ExtractorImpl::for_format(format).ok_or_else(|| ReportError::UnsupportedExtension {
            extension: format.extension().to_string(),
            allowed: self.config.allowed_extensions.join(", "),
        })
    }

    fn classify_path(
        &self,
        format: DocumentFormat,
        path: &Path,
    ) -> ReportResult<ClassificationResult> {
        let start = Instant::now();
        let extractor = self.extractor(format)?;
        let page_index = self.config.report_page_index();

        // Unreadable documents count as a missing page
        let page_text = match extractor.page_text_from_file(path, page_index) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    extractor = extractor.name(),
                    page = self.config.report_page,
                    error = %e,
                    "Could not extract report page"
                );
                None
            }
        };

        let result = self.classifier.classify(page_text.as_deref());
        match &result {
            Ok(classification) => tracing::info!(
                format = format.extension(),
                report_type = %classification.report_type(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Classified document"
            ),
            Err(e) => tracing::info!(
                format = format.extension(),
                error = %e,
                "Classification failed"
            ),
        }
        result
    }

    fn count_words_path(
        &self,
        filename: &str,
        format: DocumentFormat,
        path: &Path,
    ) -> ReportResult<WordCountResult> {
        let start = Instant::now();
        let extractor = self.extractor(format)?;
        let text = extractor
            .full_text_from_file(path)
            .map_err(|e| ReportError::Extraction(e.to_string()))?;

        let word_count = count_words(&text);
        tracing::info!(
            format = format.extension(),
            word_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Counted words"
        );

        Ok(WordCountResult {
            filename: filename.to_string(),
            format,
            word_count,
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}
