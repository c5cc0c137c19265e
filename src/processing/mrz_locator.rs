use lazy_static::lazy_static;
use regex::Regex;

use crate::models::ExtractionConfig;

lazy_static! {
    // Maximal runs over the MRZ alphabet; the length threshold is applied after.
    static ref MRZ_RUN: Regex = Regex::new(r"[A-Z0-9<]+").unwrap();
}

/// Where one concatenated run came from, as byte offsets into the
/// normalized text the locator scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRun {
    pub start: usize,
    pub end: usize,
}

impl CandidateRun {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Every long MRZ-alphabet run of the page, spliced together in reading order.
///
/// OCR splits the two TD3 lines and interleaves other text between them, so
/// the runs are joined instead of segmented into lines. Unrelated long runs
/// elsewhere on the page are spliced in too and can derail decoding; `runs`
/// keeps their offsets so adjacency checks can be layered on later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MrzCandidate {
    pub text: String,
    pub runs: Vec<CandidateRun>,
    /// The buffer hit the configured bound and was cut.
    pub truncated: bool,
}

impl MrzCandidate {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub struct MrzCandidateLocator {
    min_run_len: usize,
    max_len: usize,
}

impl MrzCandidateLocator {
    pub fn new(min_run_len: usize, max_len: usize) -> Self {
        MrzCandidateLocator {
            min_run_len,
            max_len,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.min_run_len, config.max_candidate_len)
    }

    /// Scan MRZ-normalized text (see `Normalizer::for_mrz`).
    pub fn locate(&self, normalized: &str) -> MrzCandidate {
        let mut candidate = MrzCandidate::default();

        for run in MRZ_RUN.find_iter(normalized) {
            if run.len() < self.min_run_len {
                continue;
            }

            let remaining = self.max_len.saturating_sub(candidate.text.len());
            if remaining == 0 {
                candidate.truncated = true;
                break;
            }

            // The alphabet is ASCII, so byte lengths are char lengths.
            let take = run.len().min(remaining);
            candidate
                .text
                .push_str(&normalized[run.start()..run.start() + take]);
            candidate.runs.push(CandidateRun {
                start: run.start(),
                end: run.start() + take,
            });

            if take < run.len() {
                candidate.truncated = true;
                break;
            }
        }

        candidate
    }
}

impl Default for MrzCandidateLocator {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}
