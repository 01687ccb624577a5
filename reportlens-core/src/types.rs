use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::Path;

// ===== REPORT CLASSIFICATION TYPES =====
// Produced fresh per request by ReportClassifier and serialized straight away.
// Nothing here is persisted or mutated after construction.

/// Which of the two report patterns matched on the report page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportType {
    Unknown,
    PlagiarismReport,
    AiDetectionReport,
    PlagiarismAndAiDetectionReport,
}

impl ReportType {
    /// Label used in the JSON payload
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::PlagiarismReport => "Plagiarism Report",
            Self::AiDetectionReport => "AI Detection Report",
            Self::PlagiarismAndAiDetectionReport => "Plagiarism and AI Detection Report",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the AI-detection portion of a report.
///
/// Detectors print `*%` when their score falls under the reporting
/// threshold. That state is kept as its own variant and only becomes the
/// `-1` sentinel at the JSON boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiDetection {
    Detected { percentage: u32, asterisk: bool },
    BelowThreshold,
}

impl AiDetection {
    /// Wire value of the `AI Detection` field
    pub const BELOW_THRESHOLD_SENTINEL: i64 = -1;

    pub fn value(&self) -> i64 {
        match self {
            Self::Detected { percentage, .. } => i64::from(*percentage),
            Self::BelowThreshold => Self::BELOW_THRESHOLD_SENTINEL,
        }
    }

    pub fn asterisk(&self) -> bool {
        match self {
            Self::Detected { asterisk, .. } => *asterisk,
            Self::BelowThreshold => true,
        }
    }

    pub fn is_below_threshold(&self) -> bool {
        matches!(self, Self::BelowThreshold)
    }
}

/// Structured reading of a similarity / AI-detection report page.
///
/// Fields are private so that the report type and the optional values can
/// never disagree: the type is derived from which values are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassificationResult {
    overall_similarity: Option<u32>,
    ai_detection: Option<AiDetection>,
}

impl ClassificationResult {
    pub fn new(overall_similarity: Option<u32>, ai_detection: Option<AiDetection>) -> Self {
        Self {
            overall_similarity,
            ai_detection,
        }
    }

    pub fn unknown() -> Self {
        Self::new(None, None)
    }

    pub fn report_type(&self) -> ReportType {
        match (self.overall_similarity, self.ai_detection) {
            (Some(_), Some(_)) => ReportType::PlagiarismAndAiDetectionReport,
            (Some(_), None) => ReportType::PlagiarismReport,
            (None, Some(_)) => ReportType::AiDetectionReport,
            (None, None) => ReportType::Unknown,
        }
    }

    pub fn overall_similarity(&self) -> Option<u32> {
        self.overall_similarity
    }

    pub fn ai_detection(&self) -> Option<AiDetection> {
        self.ai_detection
    }

    /// Percentage, or `-1` when the detector reported below threshold
    pub fn ai_detection_value(&self) -> Option<i64> {
        self.ai_detection.map(|ai| ai.value())
    }

    pub fn ai_detection_asterisk(&self) -> bool {
        self.ai_detection.is_some_and(|ai| ai.asterisk())
    }

    pub fn below_threshold(&self) -> bool {
        self.ai_detection.is_some_and(|ai| ai.is_below_threshold())
    }
}

impl Serialize for ClassificationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ClassificationResult", 5)?;
        state.serialize_field("type", self.report_type().as_str())?;
        state.serialize_field("Overall Similarity", &self.overall_similarity)?;
        state.serialize_field("AI Detection", &self.ai_detection_value())?;
        state.serialize_field("AI Detection Asterisk", &self.ai_detection_asterisk())?;
        state.serialize_field("Below_Threshold", &self.below_threshold())?;
        state.end()
    }
}

// ===== DOCUMENT TYPES =====

/// Upload formats the service can extract text from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    #[serde(rename = "txt")]
    Text,
}

impl DocumentFormat {
    /// Map a lowercase file extension to a format
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Text => "txt",
        }
    }
}

/// Lowercased extension of a file name, if it has one
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Word count for one uploaded document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCountResult {
    pub filename: String,
    pub format: DocumentFormat,
    pub word_count: usize,
}
