use crate::error::{ReportError, ReportResult};
use crate::types::{AiDetection, ClassificationResult};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// "83% Overall Similarity"
static SIMILARITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)%\s*Overall Similarity").unwrap());

// "12% detected as AI", "12*% detected as AI", "*% detected as AI"
static AI_DETECTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:([0-9]+)\*?%|(\*%))(?:\s*detected as AI)").unwrap());

/// Reads the summary page of a similarity / AI-detection report.
///
/// Stateless; the compiled patterns are shared statics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportClassifier;

impl ReportClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify the text of the report page.
    ///
    /// `None` (or empty text) means the page was missing or unreadable and is
    /// the only error case. Anything else classifies, falling back to
    /// `Unknown` when neither pattern is found. Only the first occurrence of
    /// each pattern counts.
    pub fn classify(&self, page_text: Option<&str>) -> ReportResult<ClassificationResult> {
        let text = match page_text {
            Some(text) if !text.is_empty() => text,
            _ => return Err(ReportError::MissingPage),
        };

        let overall_similarity = self.overall_similarity(text);
        let ai_detection = self.ai_detection(text);

        let result = ClassificationResult::new(overall_similarity, ai_detection);
        tracing::debug!(
            report_type = %result.report_type(),
            overall_similarity = ?result.overall_similarity(),
            ai_detection = ?result.ai_detection_value(),
            "Classified report page"
        );
        Ok(result)
    }

    fn overall_similarity(&self, text: &str) -> Option<u32> {
        let caps = SIMILARITY_REGEX.captures(text)?;
        whole_percentage(text, &caps, 1)
    }

    fn ai_detection(&self, text: &str) -> Option<AiDetection> {
        let caps = AI_DETECTION_REGEX.captures(text)?;

        if caps.get(1).is_some() {
            let percentage = whole_percentage(text, &caps, 1)?;
            // A '*' anywhere in the matched span marks a footnoted score
            let asterisk = caps.get(0).is_some_and(|m| m.as_str().contains('*'));
            Some(AiDetection::Detected {
                percentage,
                asterisk,
            })
        } else if caps.get(2).is_some() {
            Some(AiDetection::BelowThreshold)
        } else {
            None
        }
    }
}

/// Parse capture group `group` as an integer percentage.
///
/// Returns `None` when the digits are the fractional tail of a decimal
/// (`12.5%` must not read as `5`) or do not fit in a `u32`.
fn whole_percentage(text: &str, caps: &Captures<'_>, group: usize) -> Option<u32> {
    let digits = caps.get(group)?;
    if is_decimal_tail(text, digits.start()) {
        return None;
    }
    digits.as_str().parse().ok()
}

fn is_decimal_tail(text: &str, digits_start: usize) -> bool {
    let mut before = text[..digits_start].chars().rev();
    matches!(
        (before.next(), before.next()),
        (Some('.'), Some(c)) if c.is_ascii_digit()
    )
}
