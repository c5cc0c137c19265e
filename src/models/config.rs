use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::ExtractError;

pub const DEFAULT_MIN_RUN_LEN: usize = 30;
pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024;
pub const DEFAULT_MAX_CANDIDATE_LEN: usize = 2048;

/// How a two-digit MRZ year becomes a four-digit one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CenturyRule {
    /// Every `YY` is read as `20YY`. Birth dates before 2000 come out wrong;
    /// kept because existing callers depend on it.
    #[default]
    AlwaysTwentyFirst,
    /// `YY <= pivot` is `20YY`, anything above is `19YY`.
    Pivot(u8),
}

impl CenturyRule {
    pub fn full_year(&self, yy: u8) -> u16 {
        match self {
            CenturyRule::AlwaysTwentyFirst => 2000 + yy as u16,
            CenturyRule::Pivot(pivot) if yy <= *pivot => 2000 + yy as u16,
            CenturyRule::Pivot(_) => 1900 + yy as u16,
        }
    }
}

/// How the MRZ sex position is decoded.
///
/// The legacy reading maps everything that is not `M` to `Female`, the
/// filler included. `FillerUnspecified` reads the filler as `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SexMarkerPolicy {
    #[default]
    Legacy,
    FillerUnspecified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Best-effort OCR confusion filter on the MRZ path. Lossy: it can damage
    /// text that was already read correctly.
    pub noise_correction: bool,
    pub century: CenturyRule,
    pub sex_marker: SexMarkerPolicy,
    pub min_run_len: usize,
    pub max_input_len: usize,
    pub max_candidate_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            noise_correction: false,
            century: CenturyRule::default(),
            sex_marker: SexMarkerPolicy::default(),
            min_run_len: DEFAULT_MIN_RUN_LEN,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_candidate_len: DEFAULT_MAX_CANDIDATE_LEN,
        }
    }
}

impl ExtractionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ExtractError> {
        let config: ExtractionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ExtractError> {
        if let CenturyRule::Pivot(pivot) = self.century {
            if pivot > 99 {
                return Err(ExtractError::InvalidConfig(format!(
                    "century pivot must be within 0..=99, got {}",
                    pivot
                )));
            }
        }

        if self.min_run_len == 0 {
            return Err(ExtractError::InvalidConfig(
                "min_run_len must be positive".to_string(),
            ));
        }

        if self.max_candidate_len < self.min_run_len {
            return Err(ExtractError::InvalidConfig(format!(
                "max_candidate_len ({}) is shorter than min_run_len ({})",
                self.max_candidate_len, self.min_run_len
            )));
        }

        if self.max_input_len == 0 {
            return Err(ExtractError::InvalidConfig(
                "max_input_len must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
