// Passport field extraction from OCR text.
// MRZ first, labelled fields as fallback, and an explicit verdict on whether
// the result may be used as an identity.

pub mod models;
pub mod processing;
pub mod utils;
pub mod validation;

pub use models::{
    CenturyRule, ExtractionConfig, ExtractionReport, PassportRecord, ReportStatus, Sex,
    SexMarkerPolicy, SourceConfidence,
};
pub use processing::ExtractionPipeline;
pub use utils::ExtractError;

/// Extract with the default configuration.
///
/// Never fails: when nothing usable is found the record carries
/// `SourceConfidence::None`, which callers must treat as "could not read
/// document".
pub fn extract(raw_text: &str) -> PassportRecord {
    ExtractionPipeline::default().extract(raw_text)
}
