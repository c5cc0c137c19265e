pub mod config;
pub mod data;

pub use config::{CenturyRule, ExtractionConfig, SexMarkerPolicy};
pub use data::{
    ExtractionReport, PassportRecord, ReportStatus, Sex, SourceConfidence, ValidationIssue,
    ValidationIssueType,
};
