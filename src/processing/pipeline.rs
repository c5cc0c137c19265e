use std::sync::Arc;

use crate::models::{ExtractionConfig, ExtractionReport, PassportRecord};
use crate::processing::heuristics::HeuristicFieldExtractor;
use crate::processing::mrz_decoder::MrzDecoder;
use crate::processing::mrz_locator::MrzCandidateLocator;
use crate::processing::normalizer::Normalizer;
use crate::processing::observer::{ExtractionEvent, ExtractionObserver, LogObserver};
use crate::utils::{sha256_hex, ExtractError};
use crate::validation::{ConfidenceValidator, Stage, Verdict};

/// Raw recognised text in, classified `PassportRecord` out.
///
/// Stateless after construction: `extract` takes `&self`, does no I/O and can
/// be called from any number of threads at once.
pub struct ExtractionPipeline {
    config: ExtractionConfig,
    locator: MrzCandidateLocator,
    decoder: MrzDecoder,
    observer: Arc<dyn ExtractionObserver>,
}

impl ExtractionPipeline {
    /// Takes `config` as given. Use `try_new` for configuration that did not
    /// come through `ExtractionConfig::validate`.
    pub fn new(config: ExtractionConfig) -> Self {
        ExtractionPipeline {
            locator: MrzCandidateLocator::from_config(&config),
            decoder: MrzDecoder::from_config(&config),
            config,
            observer: Arc::new(LogObserver),
        }
    }

    pub fn try_new(config: ExtractionConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn with_observer(mut self, observer: Arc<dyn ExtractionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Total: blank input, prose and garbage all produce a record, at worst
    /// an empty one with `SourceConfidence::None`.
    pub fn extract(&self, raw_text: &str) -> PassportRecord {
        self.run(raw_text).0
    }

    /// The record together with what a transport needs to present it.
    pub fn report(&self, raw_text: &str) -> ExtractionReport {
        let (record, digest) = self.run(raw_text);
        ExtractionReport::new(record, digest)
    }

    fn run(&self, raw_text: &str) -> (PassportRecord, String) {
        let digest = sha256_hex(raw_text.as_bytes());

        let record = if raw_text.trim().is_empty() {
            PassportRecord::empty()
        } else {
            self.classify(self.bounded(raw_text))
        };

        self.observer.on_event(&ExtractionEvent::Finished {
            confidence: record.source_confidence,
            input_sha256: &digest,
        });

        (record, digest)
    }

    fn classify(&self, text: &str) -> PassportRecord {
        let mut stage = Stage::first();
        loop {
            let record = self.attempt(stage, text);
            match ConfidenceValidator::judge(record, stage) {
                Verdict::Accepted(record) => {
                    self.observer.on_event(&ExtractionEvent::StageCompleted {
                        stage,
                        reliable: true,
                    });
                    return record;
                }
                Verdict::Rejected(partial) => {
                    self.observer.on_event(&ExtractionEvent::StageCompleted {
                        stage,
                        reliable: false,
                    });
                    match stage.next() {
                        Some(next) => stage = next,
                        None => return ConfidenceValidator::exhausted(partial),
                    }
                }
            }
        }
    }

    fn attempt(&self, stage: Stage, text: &str) -> PassportRecord {
        match stage {
            Stage::MrzAttempt => {
                let normalized = Normalizer::for_mrz_with(text, self.config.noise_correction);
                let candidate = self.locator.locate(&normalized);
                self.observer.on_event(&ExtractionEvent::CandidateLocated {
                    runs: candidate.runs.len(),
                    len: candidate.text.len(),
                    truncated: candidate.truncated,
                });
                self.decoder.decode(&candidate.text)
            }
            Stage::HeuristicAttempt => HeuristicFieldExtractor::extract(text),
        }
    }

    /// Cut oversized input at a char boundary within `max_input_len` bytes.
    fn bounded<'t>(&self, text: &'t str) -> &'t str {
        let max = self.config.max_input_len;
        if text.len() <= max {
            return text;
        }

        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.observer.on_event(&ExtractionEvent::InputTruncated {
            original_len: text.len(),
            kept_len: end,
        });
        &text[..end]
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CenturyRule, SourceConfidence};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl ExtractionObserver for Recorder {
        fn on_event(&self, event: &ExtractionEvent<'_>) {
            if let Ok(mut events) = self.events.lock() {
                events.push(format!("{:?}", event));
            }
        }
    }

    #[test]
    fn test_events_follow_the_fallback_order() {
        let recorder = Arc::new(Recorder::default());
        let pipeline = ExtractionPipeline::default().with_observer(recorder.clone());

        let record = pipeline.extract("Surname: SMITH\nFirst Name: ANNA\nPassport No: X1234567\n");
        assert_eq!(record.source_confidence, SourceConfidence::Heuristic);

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 4);
        assert!(events[0].starts_with("CandidateLocated { runs: 0"));
        assert!(events[1].contains("MrzAttempt, reliable: false"));
        assert!(events[2].contains("HeuristicAttempt, reliable: true"));
        assert!(events[3].starts_with("Finished { confidence: Heuristic"));
    }

    #[test]
    fn test_events_never_carry_the_text() {
        let recorder = Arc::new(Recorder::default());
        let pipeline = ExtractionPipeline::default().with_observer(recorder.clone());
        pipeline.extract("Surname: SECRETNAME\n");

        let events = recorder.events.lock().unwrap();
        assert!(events.iter().all(|e| !e.contains("SECRETNAME")));
    }

    #[test]
    fn test_oversized_input_is_truncated_on_char_boundary() {
        let config = ExtractionConfig {
            max_input_len: 5,
            min_run_len: 3,
            max_candidate_len: 10,
            ..ExtractionConfig::default()
        };
        let recorder = Arc::new(Recorder::default());
        let pipeline = ExtractionPipeline::new(config).with_observer(recorder.clone());

        let record = pipeline.extract("ab\u{e9}\u{e9}cdef");
        assert_eq!(record.source_confidence, SourceConfidence::None);

        let events = recorder.events.lock().unwrap();
        assert!(events[0].contains("InputTruncated { original_len: 10, kept_len: 4 }"));
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let result = ExtractionPipeline::try_new(ExtractionConfig {
            century: CenturyRule::Pivot(120),
            ..ExtractionConfig::default()
        });
        match result {
            Err(ExtractError::InvalidConfig(message)) => assert!(message.contains("120")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("pivot 120 was accepted"),
        }

        assert!(ExtractionPipeline::try_new(ExtractionConfig::default()).is_ok());
    }

    #[test]
    fn test_report_digest_matches_input() {
        let report = ExtractionPipeline::default().report("");
        assert_eq!(report.input_sha256, sha256_hex(b""));
        assert!(!report.is_readable());
    }
}
