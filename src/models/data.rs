use serde::{Deserialize, Serialize};

/// Provenance of the values carried by a `PassportRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SourceConfidence {
    /// Decoded from the machine readable zone.
    Mrz,
    /// Pulled from printed field labels.
    Heuristic,
    /// Extraction failed. No other field of the record can be trusted.
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unspecified,
}

/// The identity fields extracted from one passport page.
///
/// Created fresh for every extraction call and handed to the caller; the
/// extractor keeps no copy. Dates are canonical `YYYY-MM-DD` or empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportRecord {
    pub given_names: String,
    pub surname: String,
    pub document_number: String,
    pub nationality: String,
    pub date_of_birth: String,
    pub date_of_expiry: String,
    pub sex: Sex,
    pub source_confidence: SourceConfidence,
}

impl PassportRecord {
    /// An empty record marked as failed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Same fields, different provenance.
    pub fn with_confidence(mut self, confidence: SourceConfidence) -> Self {
        self.source_confidence = confidence;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.given_names.trim().is_empty()
            && self.surname.trim().is_empty()
            && self.document_number.trim().is_empty()
            && self.nationality.trim().is_empty()
            && self.date_of_birth.is_empty()
            && self.date_of_expiry.is_empty()
            && self.sex == Sex::Unspecified
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub issue_type: ValidationIssueType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssueType {
    DateOfBirth,
    DateOfExpiry,
    Expiry,
}

/// Outcome shown to the person holding the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ok,
    /// "Could not read document": the transport must not present the
    /// record's fields as an identity.
    Unreadable,
}

/// What a transport layer hands back for one recognised page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub status: ReportStatus,
    pub record: PassportRecord,
    pub input_sha256: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
}

impl ExtractionReport {
    pub fn new(record: PassportRecord, input_sha256: String) -> Self {
        let status = match record.source_confidence {
            SourceConfidence::Mrz | SourceConfidence::Heuristic => ReportStatus::Ok,
            SourceConfidence::None => ReportStatus::Unreadable,
        };

        ExtractionReport {
            status,
            record,
            input_sha256,
            raw_text: None,
            issues: Vec::new(),
        }
    }

    pub fn with_raw_text(mut self, raw_text: &str) -> Self {
        self.raw_text = Some(raw_text.to_string());
        self
    }

    pub fn with_issues(mut self, issues: Vec<ValidationIssue>) -> Self {
        self.issues = issues;
        self
    }

    pub fn is_readable(&self) -> bool {
        self.status == ReportStatus::Ok
    }
}
