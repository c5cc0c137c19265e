use crate::models::CenturyRule;

const MONTHS: [(&str, &str); 12] = [
    ("jan", "01"),
    ("feb", "02"),
    ("mar", "03"),
    ("apr", "04"),
    ("may", "05"),
    ("jun", "06"),
    ("jul", "07"),
    ("aug", "08"),
    ("sep", "09"),
    ("oct", "10"),
    ("nov", "11"),
    ("dec", "12"),
];

/// Converts the two date spellings found on passports to `YYYY-MM-DD`.
///
/// Shape only: no calendar validation happens here (see `DateValidator`).
pub struct DateNormalizer;

impl DateNormalizer {
    /// `YYMMDD` with the legacy century rule, so `010101` is `2001-01-01`.
    pub fn from_compact(yymmdd: &str) -> String {
        Self::from_compact_with(yymmdd, CenturyRule::AlwaysTwentyFirst)
    }

    /// `YYMMDD` with an explicit century rule. Anything other than six ASCII
    /// digits yields an empty string.
    pub fn from_compact_with(yymmdd: &str, century: CenturyRule) -> String {
        let bytes = yymmdd.as_bytes();
        if bytes.len() != 6 || !bytes.iter().all(u8::is_ascii_digit) {
            return String::new();
        }

        let yy = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        format!(
            "{:04}-{}-{}",
            century.full_year(yy),
            &yymmdd[2..4],
            &yymmdd[4..6]
        )
    }

    /// `DD Mon YYYY` to `YYYY-MM-DD`. Unknown month abbreviations read as
    /// January; input that is not exactly three tokens comes back unchanged.
    pub fn from_free_text(text: &str) -> String {
        let parts: Vec<&str> = text.split_whitespace().collect();
        if parts.len() != 3 {
            return text.to_string();
        }

        let month = Self::month_number(parts[1]).unwrap_or("01");
        format!("{}-{}-{}", parts[2], month, parts[0])
    }

    fn month_number(abbreviation: &str) -> Option<&'static str> {
        let lower = abbreviation.to_lowercase();
        MONTHS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, number)| *number)
    }
}
