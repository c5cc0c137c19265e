use chrono::NaiveDate;

use crate::models::{PassportRecord, ValidationIssue, ValidationIssueType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateValidationResult {
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_expiry: Option<NaiveDate>,
    /// `None` when the expiry date is missing or not a calendar date.
    pub expired: Option<bool>,
    pub issues: Vec<ValidationIssue>,
}

/// Calendar diagnostics for the canonical dates of a record.
///
/// Extraction only guarantees the `YYYY-MM-DD` shape; this reports which
/// dates are real and whether the document has lapsed. It never alters the
/// record or its confidence.
pub struct DateValidator;

impl DateValidator {
    pub fn validate(record: &PassportRecord, today: NaiveDate) -> DateValidationResult {
        let mut issues = Vec::new();

        let date_of_birth = Self::check(
            &record.date_of_birth,
            ValidationIssueType::DateOfBirth,
            "date of birth",
            &mut issues,
        );
        let date_of_expiry = Self::check(
            &record.date_of_expiry,
            ValidationIssueType::DateOfExpiry,
            "date of expiry",
            &mut issues,
        );

        if let Some(birth) = date_of_birth {
            if birth > today {
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::DateOfBirth,
                    message: format!("Date of birth {} is in the future", birth),
                });
            }
        }

        let expired = date_of_expiry.map(|expiry| expiry < today);
        if expired == Some(true) {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Expiry,
                message: format!("Document expired on {}", record.date_of_expiry),
            });
        }

        DateValidationResult {
            date_of_birth,
            date_of_expiry,
            expired,
            issues,
        }
    }

    /// Parse a canonical `YYYY-MM-DD` string.
    pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
    }

    fn check(
        value: &str,
        issue_type: ValidationIssueType,
        label: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<NaiveDate> {
        if value.is_empty() {
            return None;
        }

        let parsed = Self::parse_date(value);
        if parsed.is_none() {
            issues.push(ValidationIssue {
                issue_type,
                message: format!("Invalid {} '{}'", label, value),
            });
        }
        parsed
    }
}
