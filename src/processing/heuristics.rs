use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{PassportRecord, Sex};
use crate::processing::dates::DateNormalizer;
use crate::processing::normalizer::Normalizer;

// Patterns run on `Normalizer::for_labels` output: uppercase, single spaces,
// one line per printed line. Name values stop at the end of their line.
lazy_static! {
    static ref SURNAME_PATTERN: Regex =
        Regex::new(r"\b(?:SURNAME|LAST NAME)[: ]+([A-Z][A-Z ]*)").unwrap();
    static ref GIVEN_NAME_PATTERN: Regex =
        Regex::new(r"\b(?:GIVEN NAMES?|FIRST NAMES?)[: ]+([A-Z][A-Z ]*)").unwrap();
    static ref DOCUMENT_NUMBER_PATTERN: Regex =
        Regex::new(r"\bPASSPORT (?:NO|NUMBER)\.?[: ]*([A-Z0-9]{6,9})").unwrap();
    static ref DATE_PATTERN: Regex = Regex::new(r"\b([0-9]{2} [A-Z]{3} [0-9]{4})\b").unwrap();
    static ref EXPIRY_PATTERN: Regex =
        Regex::new(r"\b(?:EXPIRY DATE|DATE OF EXPIRY)[: ]*([0-9]{2} [A-Z]{3} [0-9]{4})").unwrap();
    static ref NATIONALITY_PATTERN: Regex = Regex::new(r"\bNATIONALITY[: ]*([A-Z]{3})").unwrap();
    static ref SEX_PATTERN: Regex = Regex::new(r"\b(MALE|FEMALE|M|F)\b").unwrap();
}

/// Label-driven fallback for pages whose MRZ could not be decoded.
///
/// Every field is matched on its own and the first match wins. Nothing ties
/// the fields together: the birth date is simply the first `DD Mon YYYY` on
/// the page and the sex is the first standalone `M`/`F`/`MALE`/`FEMALE`, so
/// unrelated text can be picked up.
pub struct HeuristicFieldExtractor;

impl HeuristicFieldExtractor {
    /// Accepts raw or already label-normalized text.
    pub fn extract(text: &str) -> PassportRecord {
        let normalized = Normalizer::for_labels(text);

        PassportRecord {
            surname: Self::extract_surname(&normalized).unwrap_or_default(),
            given_names: Self::extract_given_names(&normalized).unwrap_or_default(),
            document_number: Self::extract_document_number(&normalized).unwrap_or_default(),
            nationality: Self::extract_nationality(&normalized).unwrap_or_default(),
            date_of_birth: Self::extract_date_of_birth(&normalized).unwrap_or_default(),
            date_of_expiry: Self::extract_date_of_expiry(&normalized).unwrap_or_default(),
            sex: Self::extract_sex(&normalized),
            ..PassportRecord::default()
        }
    }

    pub fn extract_surname(text: &str) -> Option<String> {
        Self::capture(&SURNAME_PATTERN, text)
            .map(Normalizer::clean_name)
            .filter(|name| !name.is_empty())
    }

    pub fn extract_given_names(text: &str) -> Option<String> {
        Self::capture(&GIVEN_NAME_PATTERN, text)
            .map(Normalizer::clean_name)
            .filter(|name| !name.is_empty())
    }

    pub fn extract_document_number(text: &str) -> Option<String> {
        Self::capture(&DOCUMENT_NUMBER_PATTERN, text).map(str::to_string)
    }

    pub fn extract_nationality(text: &str) -> Option<String> {
        Self::capture(&NATIONALITY_PATTERN, text).map(str::to_string)
    }

    pub fn extract_date_of_birth(text: &str) -> Option<String> {
        Self::capture(&DATE_PATTERN, text).map(DateNormalizer::from_free_text)
    }

    pub fn extract_date_of_expiry(text: &str) -> Option<String> {
        Self::capture(&EXPIRY_PATTERN, text).map(DateNormalizer::from_free_text)
    }

    pub fn extract_sex(text: &str) -> Sex {
        match Self::capture(&SEX_PATTERN, text) {
            Some("M") | Some("MALE") => Sex::Male,
            Some("F") | Some("FEMALE") => Sex::Female,
            _ => Sex::Unspecified,
        }
    }

    fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
        pattern
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceConfidence;

    const DATA_PAGE: &str = "UNITED STATES OF AMERICA\n\
        Surname: Smith\n\
        Given Names: Anna  Maria\n\
        Passport No: X1234567\n\
        Nationality: USA\n\
        Date of birth 07 Aug 1999\n\
        Sex F\n\
        Date of Expiry: 12 Mar 2031\n";

    #[test]
    fn test_extracts_labelled_fields() {
        let record = HeuristicFieldExtractor::extract(DATA_PAGE);

        assert_eq!(record.surname, "SMITH");
        assert_eq!(record.given_names, "ANNA MARIA");
        assert_eq!(record.document_number, "X1234567");
        assert_eq!(record.nationality, "USA");
        assert_eq!(record.date_of_birth, "1999-08-07");
        assert_eq!(record.date_of_expiry, "2031-03-12");
        assert_eq!(record.sex, Sex::Female);
        assert_eq!(record.source_confidence, SourceConfidence::None);
    }

    #[test]
    fn test_names_stop_at_line_end() {
        let text = "Last Name: Doe\nFirst Name: John\n";
        let text = Normalizer::for_labels(text);
        assert_eq!(
            HeuristicFieldExtractor::extract_surname(&text).as_deref(),
            Some("DOE")
        );
        assert_eq!(
            HeuristicFieldExtractor::extract_given_names(&text).as_deref(),
            Some("JOHN")
        );
    }

    #[test]
    fn test_passport_number_label_variants() {
        assert_eq!(
            HeuristicFieldExtractor::extract_document_number("PASSPORT NUMBER: AB123456").as_deref(),
            Some("AB123456")
        );
        assert_eq!(
            HeuristicFieldExtractor::extract_document_number("PASSPORT NO.X1234567").as_deref(),
            Some("X1234567")
        );
        assert_eq!(HeuristicFieldExtractor::extract_document_number("PASSPORT NO: 12345"), None);
    }

    #[test]
    fn test_birth_date_is_first_date_on_page() {
        // No cross-field check: an issue date printed first wins.
        let text = Normalizer::for_labels("Date of issue 01 Jan 2020\nDate of birth 07 Aug 1999");
        assert_eq!(
            HeuristicFieldExtractor::extract_date_of_birth(&text).as_deref(),
            Some("2020-01-01")
        );
    }

    #[test]
    fn test_sex_tokens() {
        assert_eq!(HeuristicFieldExtractor::extract_sex("SEX: MALE"), Sex::Male);
        assert_eq!(HeuristicFieldExtractor::extract_sex("SEX M"), Sex::Male);
        assert_eq!(HeuristicFieldExtractor::extract_sex("FEMALE"), Sex::Female);
        assert_eq!(HeuristicFieldExtractor::extract_sex("FORMAL MEMO"), Sex::Unspecified);
    }

    #[test]
    fn test_nothing_found_in_prose() {
        let record = HeuristicFieldExtractor::extract("Thank you for visiting the consulate.");
        assert!(record.is_empty());
    }
}
