/// The MRZ padding glyph.
pub const FILLER: char = '<';

/// Letters OCR tends to produce where the MRZ has a filler.
const FILLER_CONFUSIONS: [char; 3] = ['c', 'k', 'x'];

/// Normalizer prepares recognised text for the two readers downstream.
///
/// Structural normalization is idempotent. The noise filter is not a
/// correction guarantee, only a best-effort remap of a small confusion table.
pub struct Normalizer;

impl Normalizer {
    /// MRZ scanning form: every whitespace character removed, uppercased.
    pub fn for_mrz(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase()
    }

    /// MRZ scanning form with the optional filler-confusion remap applied
    /// before uppercasing, while `c`/`k`/`x` are still distinguishable from
    /// genuine capitals.
    pub fn for_mrz_with(text: &str, noise_correction: bool) -> String {
        if noise_correction {
            Self::for_mrz(&Self::correct_fillers(text))
        } else {
            Self::for_mrz(text)
        }
    }

    /// Label scanning form: one line per non-blank input line, runs of
    /// spaces and tabs squeezed to a single space, uppercased.
    pub fn for_labels(text: &str) -> String {
        text.split(|c| c == '\n' || c == '\r')
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
            .to_uppercase()
    }

    /// Lowercase `c`, `k` and `x` become the filler.
    pub fn correct_fillers(text: &str) -> String {
        text.chars()
            .map(|c| if FILLER_CONFUSIONS.contains(&c) { FILLER } else { c })
            .collect()
    }

    /// Letters that look like digits are read as the digit.
    ///
    /// Only meaningful for fields that are numeric by construction; applied
    /// to a name it would destroy it.
    pub fn numeric_reading(text: &str) -> String {
        text.chars()
            .map(|c| match c {
                'O' | 'o' => '0',
                'I' | 'i' | 'l' | 'L' => '1',
                other => other,
            })
            .collect()
    }

    /// Filler characters become spaces, space runs collapse, ends trimmed.
    pub fn clean_name(block: &str) -> String {
        block
            .replace(FILLER, " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mrz_form_strips_all_whitespace() {
        assert_eq!(
            Normalizer::for_mrz("p<uto bloggs\r\n<<joan\t<<"),
            "P<UTOBLOGGS<<JOAN<<"
        );
    }

    #[test]
    fn test_label_form_keeps_single_newlines() {
        let text = "Surname:   Smith\r\n\r\n\n  First Name:\tAnna  \n";
        assert_eq!(Normalizer::for_labels(text), "SURNAME: SMITH\nFIRST NAME: ANNA");
    }

    #[test]
    fn test_structural_forms_are_idempotent() {
        let samples = [
            "",
            "   \n\n ",
            "P<UTOBLOGGS<<JOAN<<<\nL898902C36UTO6503231F9712268",
            "Surname: smith\r\nGiven  Names : Anna  Maria\n\n",
            "straße ǆ mixed\tCASE\u{2028}line",
        ];
        for sample in samples {
            let mrz = Normalizer::for_mrz(sample);
            assert_eq!(Normalizer::for_mrz(&mrz), mrz, "mrz form of {:?}", sample);
            let labels = Normalizer::for_labels(sample);
            assert_eq!(Normalizer::for_labels(&labels), labels, "label form of {:?}", sample);
        }
    }

    #[test]
    fn test_filler_confusions_only_touch_lowercase() {
        assert_eq!(Normalizer::correct_fillers("JOAN<ckx<CKX"), "JOAN<<<<<CKX");
        assert_eq!(Normalizer::for_mrz_with("JOANckx", true), "JOAN<<<");
        assert_eq!(Normalizer::for_mrz_with("JOANckx", false), "JOANCKX");
    }

    #[test]
    fn test_numeric_reading() {
        assert_eq!(Normalizer::numeric_reading("65O323"), "650323");
        assert_eq!(Normalizer::numeric_reading("97I2L6"), "971216");
        assert_eq!(Normalizer::numeric_reading("123456"), "123456");
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(Normalizer::clean_name("ANNA<MARIA<<<"), "ANNA MARIA");
        assert_eq!(Normalizer::clean_name("<<"), "");
        assert_eq!(Normalizer::clean_name("VAN<<DER<BERG"), "VAN DER BERG");
    }
}
