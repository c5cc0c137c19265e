use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::models::{CenturyRule, ExtractionConfig, PassportRecord, Sex, SexMarkerPolicy};
use crate::processing::dates::DateNormalizer;
use crate::processing::normalizer::{Normalizer, FILLER};

/// Longest stretch of unrelated characters skipped between the names and
/// line two, and between the sex marker and the expiry date.
pub const MAX_GAP: usize = 50;

const DIGITS: &str = "0-9";
// Letters OCR confuses with digits, as they look after uppercasing.
const DIGITS_AND_LOOKALIKES: &str = "0-9OIL";

/// `P`, a filler document type and the issuing state.
const FILLER_TYPE_PREFIX: &str = "P<[A-Z<]{3}";
/// Length of `P`, the document type and the issuing state.
const PREFIX_LEN: usize = 5;

/// The one TD3 grammar, parametrized by the line-one prefix it requires and
/// by what a numeric slot accepts.
///
/// Deliberately loose: fields are located by shape with bounded gaps between
/// them rather than by fixed columns, so a missing `P<XXX` prefix, a dropped
/// check digit or a line break joined into the buffer does not break it.
/// Document numbers shorter than nine characters may carry their filler
/// padding. Check digits are skipped, never verified.
fn td3_pattern(prefix: &str, digit: &str) -> String {
    format!(
        concat!(
            r"{prefix}",
            r"(?P<surname>[A-Z]+(?:<[A-Z]+)*)",
            r"<<",
            r"(?P<given>[A-Z]+(?:<[A-Z]+)*)",
            r".{{0,{gap}}}?",
            r"(?P<number>[A-Z0-9]{{6,9}})",
            r"<{{0,3}}",
            r"[{d}<]?",
            r"(?P<nationality>[A-Z]{{3}})",
            r"(?P<birth>[{d}]{{6}})",
            r"[{d}<]?",
            r"(?P<sex>[MF<])",
            r".{{0,{gap}}}?",
            r"(?P<expiry>[{d}]{{6}})",
        ),
        prefix = prefix,
        gap = MAX_GAP,
        d = digit,
    )
}

/// Both readings of one grammar. `anchored` requires a `P<` prefix and is
/// tried first, so page text glued in front of line one cannot reach the
/// surname. `bare` starts at the surname.
struct Td3Patterns {
    anchored: Regex,
    bare: Regex,
}

lazy_static! {
    static ref TD3_STRICT: Td3Patterns = Td3Patterns {
        anchored: Regex::new(&td3_pattern(FILLER_TYPE_PREFIX, DIGITS)).unwrap(),
        bare: Regex::new(&td3_pattern("", DIGITS)).unwrap(),
    };
    static ref TD3_TOLERANT: Td3Patterns = Td3Patterns {
        anchored: Regex::new(&td3_pattern(FILLER_TYPE_PREFIX, DIGITS_AND_LOOKALIKES)).unwrap(),
        bare: Regex::new(&td3_pattern("", DIGITS_AND_LOOKALIKES)).unwrap(),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Td3Grammar {
    /// Numeric slots take digits only.
    Strict,
    /// Numeric slots also take `O`, `I` and `L`, read back as digits.
    Tolerant,
}

impl Td3Grammar {
    fn patterns(&self) -> &'static Td3Patterns {
        match self {
            Td3Grammar::Strict => &*TD3_STRICT,
            Td3Grammar::Tolerant => &*TD3_TOLERANT,
        }
    }
}

/// Applies the TD3 grammar to a candidate buffer.
///
/// A non-match is the common case for noisy pages, not an error: it yields an
/// empty record and leaves classification to `ConfidenceValidator`.
pub struct MrzDecoder {
    grammar: Td3Grammar,
    century: CenturyRule,
    sex_marker: SexMarkerPolicy,
}

impl MrzDecoder {
    pub fn new(grammar: Td3Grammar, century: CenturyRule, sex_marker: SexMarkerPolicy) -> Self {
        MrzDecoder {
            grammar,
            century,
            sex_marker,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        let grammar = if config.noise_correction {
            Td3Grammar::Tolerant
        } else {
            Td3Grammar::Strict
        };
        Self::new(grammar, config.century, config.sex_marker)
    }

    pub fn decode(&self, candidate: &str) -> PassportRecord {
        if candidate.is_empty() {
            return PassportRecord::empty();
        }

        let patterns = self.grammar.patterns();
        if let Some(captures) = patterns.anchored.captures(candidate) {
            return self.record_from(&captures, group(&captures, "surname"));
        }
        match patterns.bare.captures(candidate) {
            Some(captures) => {
                let surname = strip_letter_type_prefix(
                    group(&captures, "surname"),
                    group(&captures, "nationality"),
                );
                self.record_from(&captures, surname)
            }
            None => PassportRecord::empty(),
        }
    }

    fn record_from(&self, captures: &Captures<'_>, surname: &str) -> PassportRecord {
        let field = |name: &str| group(captures, name);

        PassportRecord {
            surname: Normalizer::clean_name(surname),
            given_names: Normalizer::clean_name(field("given")),
            document_number: field("number").to_string(),
            nationality: field("nationality").to_string(),
            date_of_birth: self.date(field("birth")),
            date_of_expiry: self.date(field("expiry")),
            sex: self.sex(field("sex")),
            ..PassportRecord::default()
        }
    }

    fn date(&self, raw: &str) -> String {
        match self.grammar {
            Td3Grammar::Strict => DateNormalizer::from_compact_with(raw, self.century),
            Td3Grammar::Tolerant => {
                DateNormalizer::from_compact_with(&Normalizer::numeric_reading(raw), self.century)
            }
        }
    }

    fn sex(&self, marker: &str) -> Sex {
        if marker == "M" {
            return Sex::Male;
        }
        match self.sex_marker {
            SexMarkerPolicy::Legacy => Sex::Female,
            SexMarkerPolicy::FillerUnspecified if marker.starts_with(FILLER) => Sex::Unspecified,
            SexMarkerPolicy::FillerUnspecified => Sex::Female,
        }
    }
}

fn group<'t>(captures: &Captures<'t>, name: &str) -> &'t str {
    captures.name(name).map(|m| m.as_str()).unwrap_or("")
}

/// A letter document type (`PD`, `PO`, ...) leaves no filler to anchor on,
/// so on the bare reading the prefix is still glued to the surname. It is
/// split off only when its issuing state repeats the nationality of line
/// two; `PETERSON` stays whole.
fn strip_letter_type_prefix<'t>(surname: &'t str, nationality: &str) -> &'t str {
    let first_word = surname.split(FILLER).next().unwrap_or_default();
    if first_word.len() > PREFIX_LEN
        && first_word.starts_with('P')
        && &first_word[2..PREFIX_LEN] == nationality
    {
        &surname[PREFIX_LEN..]
    } else {
        surname
    }
}

impl Default for MrzDecoder {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}
