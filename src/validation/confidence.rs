use crate::models::{PassportRecord, SourceConfidence};

/// Extraction attempts, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    MrzAttempt,
    HeuristicAttempt,
}

impl Stage {
    pub fn first() -> Self {
        Stage::MrzAttempt
    }

    /// The attempt to fall back to, or `None` once every path is exhausted.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::MrzAttempt => Some(Stage::HeuristicAttempt),
            Stage::HeuristicAttempt => None,
        }
    }

    /// Provenance stamped on a record this stage produced and that passed.
    pub fn confidence(&self) -> SourceConfidence {
        match self {
            Stage::MrzAttempt => SourceConfidence::Mrz,
            Stage::HeuristicAttempt => SourceConfidence::Heuristic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(PassportRecord),
    Rejected(PassportRecord),
}

/// Decides whether a record may be presented as an identity.
///
/// Reliable means given names, surname and document number are all present.
/// A failed extraction is reported as `SourceConfidence::None`, never papered
/// over with placeholder data.
pub struct ConfidenceValidator;

impl ConfidenceValidator {
    pub fn is_reliable(record: &PassportRecord) -> bool {
        !record.given_names.trim().is_empty()
            && !record.surname.trim().is_empty()
            && !record.document_number.trim().is_empty()
    }

    /// Stamp the stage's confidence on a reliable record, or hand the record
    /// back unstamped.
    pub fn judge(record: PassportRecord, stage: Stage) -> Verdict {
        if Self::is_reliable(&record) {
            Verdict::Accepted(record.with_confidence(stage.confidence()))
        } else {
            Verdict::Rejected(record.with_confidence(SourceConfidence::None))
        }
    }

    /// Terminal outcome once every stage rejected: the last partial record,
    /// marked as failed.
    pub fn exhausted(partial: PassportRecord) -> PassportRecord {
        partial.with_confidence(SourceConfidence::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(given: &str, surname: &str, number: &str) -> PassportRecord {
        PassportRecord {
            given_names: given.to_string(),
            surname: surname.to_string(),
            document_number: number.to_string(),
            nationality: "UTO".to_string(),
            ..PassportRecord::default()
        }
    }

    #[test]
    fn test_reliability_truth_table() {
        for mask in 0..8u8 {
            let given = if mask & 1 != 0 { "ANNA" } else { "  " };
            let surname = if mask & 2 != 0 { "SMITH" } else { "" };
            let number = if mask & 4 != 0 { "X1234567" } else { "\t" };
            let expected = mask == 7;
            assert_eq!(
                ConfidenceValidator::is_reliable(&record(given, surname, number)),
                expected,
                "mask {:03b}",
                mask
            );
        }
    }

    #[test]
    fn test_other_fields_do_not_matter() {
        let mut r = record("ANNA", "SMITH", "X1234567");
        r.nationality.clear();
        r.date_of_birth.clear();
        assert!(ConfidenceValidator::is_reliable(&r));
    }

    #[test]
    fn test_judge_stamps_stage_confidence() {
        let r = record("ANNA", "SMITH", "X1234567");
        match ConfidenceValidator::judge(r.clone(), Stage::HeuristicAttempt) {
            Verdict::Accepted(accepted) => {
                assert_eq!(accepted.source_confidence, SourceConfidence::Heuristic)
            }
            Verdict::Rejected(_) => panic!("reliable record rejected"),
        }

        match ConfidenceValidator::judge(record("ANNA", "", "X1234567"), Stage::MrzAttempt) {
            Verdict::Rejected(rejected) => {
                assert_eq!(rejected.source_confidence, SourceConfidence::None);
                assert_eq!(rejected.given_names, "ANNA");
            }
            Verdict::Accepted(_) => panic!("unreliable record accepted"),
        }
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(Stage::first(), Stage::MrzAttempt);
        assert_eq!(Stage::first().next(), Some(Stage::HeuristicAttempt));
        assert_eq!(Stage::HeuristicAttempt.next(), None);
    }

    #[test]
    fn test_exhausted_keeps_partial_fields() {
        let partial = record("", "SMITH", "").with_confidence(SourceConfidence::Heuristic);
        let failed = ConfidenceValidator::exhausted(partial);
        assert_eq!(failed.source_confidence, SourceConfidence::None);
        assert_eq!(failed.surname, "SMITH");
    }
}
