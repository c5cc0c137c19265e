use log::{debug, info};

use crate::models::SourceConfidence;
use crate::validation::Stage;

/// Structured progress of one extraction. Never carries the recognised text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionEvent<'a> {
    InputTruncated {
        original_len: usize,
        kept_len: usize,
    },
    CandidateLocated {
        runs: usize,
        len: usize,
        truncated: bool,
    },
    StageCompleted {
        stage: Stage,
        reliable: bool,
    },
    Finished {
        confidence: SourceConfidence,
        input_sha256: &'a str,
    },
}

/// Hook the pipeline reports to. Implementations must be cheap and must not
/// panic; the pipeline is shared across threads.
pub trait ExtractionObserver: Send + Sync {
    fn on_event(&self, event: &ExtractionEvent<'_>);
}

/// Forwards events to the `log` facade. Silent unless the host installs a
/// logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ExtractionObserver for LogObserver {
    fn on_event(&self, event: &ExtractionEvent<'_>) {
        match event {
            ExtractionEvent::InputTruncated {
                original_len,
                kept_len,
            } => debug!(
                "input truncated from {} to {} bytes before scanning",
                original_len, kept_len
            ),
            ExtractionEvent::CandidateLocated {
                runs,
                len,
                truncated,
            } => debug!(
                "MRZ candidate: {} run(s), {} chars, truncated={}",
                runs, len, truncated
            ),
            ExtractionEvent::StageCompleted { stage, reliable } => {
                debug!("{:?} finished, reliable={}", stage, reliable)
            }
            ExtractionEvent::Finished {
                confidence,
                input_sha256,
            } => info!(
                "extraction finished: confidence={:?} input_sha256={}",
                confidence, input_sha256
            ),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {
    fn on_event(&self, _event: &ExtractionEvent<'_>) {}
}
