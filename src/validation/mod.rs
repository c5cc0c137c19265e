pub mod confidence;
pub mod dates;

pub use confidence::{ConfidenceValidator, Stage, Verdict};
pub use dates::{DateValidationResult, DateValidator};
