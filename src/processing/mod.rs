pub mod dates;
pub mod heuristics;
pub mod mrz_decoder;
pub mod mrz_locator;
pub mod normalizer;
pub mod observer;
pub mod pipeline;

pub use dates::DateNormalizer;
pub use heuristics::HeuristicFieldExtractor;
pub use mrz_decoder::{MrzDecoder, Td3Grammar};
pub use mrz_locator::{CandidateRun, MrzCandidate, MrzCandidateLocator};
pub use normalizer::Normalizer;
pub use observer::{ExtractionEvent, ExtractionObserver, LogObserver, NoopObserver};
pub use pipeline::ExtractionPipeline;
