use std::sync::LazyLock;

use regex::Regex;

use crate::script::{contains_arabic, contains_bengali};

/// Payload lines must be longer than this many characters.
const MIN_PAYLOAD_CHARS: usize = 10;
/// Reference lines are strictly longer than this...
const MIN_REFERENCE_CHARS: usize = 3;
/// ...and strictly shorter than this.
const MAX_REFERENCE_CHARS: usize = 60;

static REFERENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z\s'’\-]+\s[0-9]+(?:-[0-9]+)?$").expect("valid reference line regex")
});

static ENGLISH_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^english:").expect("valid english label regex"));

const BANGLA_LABEL: &str = "বাংলা:";

/// What a single block's plain text could be, judged on the text alone.
///
/// The normalizer combines these facts with its citation state; see
/// `VerseNormalizer::push` for the priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClass {
    pub reference: bool,
    pub arabic: bool,
    pub english: bool,
    pub bangla: bool,
}

/// Classifies block text for verse citation detection.
pub struct VerseLineClassifier;

impl VerseLineClassifier {
    pub fn classify(&self, text: &str) -> LineClass {
        LineClass {
            reference: is_reference_line(text),
            arabic: is_arabic_payload(text),
            english: is_english_translation(text),
            bangla: is_bangla_translation(text),
        }
    }
}

/// `Al-Baqara 255`, `Surah An-Nisa 1-4`: Latin name, space, verse or range.
pub fn is_reference_line(text: &str) -> bool {
    let len = text.chars().count();
    len > MIN_REFERENCE_CHARS
        && len < MAX_REFERENCE_CHARS
        && !contains_arabic(text)
        && REFERENCE_LINE.is_match(text)
}

pub fn is_arabic_payload(text: &str) -> bool {
    contains_arabic(text) && text.chars().count() > MIN_PAYLOAD_CHARS
}

/// English translations are only recognised by their label.
pub fn is_english_translation(text: &str) -> bool {
    ENGLISH_LABEL.is_match(text)
}

/// Bangla translations are recognised by label, or by script when unlabelled.
pub fn is_bangla_translation(text: &str) -> bool {
    if text.starts_with(BANGLA_LABEL) {
        return true;
    }
    contains_bengali(text) && text.chars().count() > MIN_PAYLOAD_CHARS && !contains_arabic(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Al-Baqara 255", true)]
    #[case("Al-Baqara 1-4", true)]
    #[case("Surah An-Nisa 5", true)]
    #[case("Ali 'Imran 7", true)]
    #[case("Ali ’Imran 7", true)]
    #[case("Y 1", false)] // too short
    #[case("Yas 1", true)]
    #[case("Al-Baqara", false)]
    #[case("255", false)]
    #[case("Al-Baqara 255.", false)]
    #[case("Al-Baqara 2:255", false)]
    #[case("Chapter one is short 12", true)]
    #[case("This line is deliberately far too long to be a verse reference 12", false)]
    #[case("البقرة 255", false)]
    #[case("সূরা ফাতিহা 1", false)]
    fn reference_lines(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_reference_line(text), expected, "{text}");
    }

    #[rstest]
    #[case("بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ", true)]
    #[case("ٱللَّهُ", false)] // too short
    #[case("In the name of God", false)]
    fn arabic_payloads(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_arabic_payload(text), expected);
    }

    #[rstest]
    #[case("English: In the name of God", true)]
    #[case("english: lowercase label", true)]
    #[case("ENGLISH:shouting", true)]
    #[case("In the name of God, the Most Gracious", false)]
    #[case("Translation (English): x", false)]
    fn english_translations(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_english_translation(text), expected);
    }

    #[rstest]
    #[case("বাংলা: পরম করুণাময়", true)]
    #[case("বাংলা:", true)]
    #[case("পরম করুণাময় অতি দয়ালু আল্লাহর নামে", true)]
    #[case("পরম", false)] // too short without label
    #[case("পরম করুণাময় অতি দয়ালু بِسْمِ", false)]
    #[case("English: In the name of God", false)]
    fn bangla_translations(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_bangla_translation(text), expected);
    }

    #[test]
    fn classifier_reports_every_fact() {
        let class = VerseLineClassifier.classify("বাংলা: পরম করুণাময় অতি দয়ালু");
        assert_eq!(
            class,
            LineClass {
                bangla: true,
                ..LineClass::default()
            }
        );
    }
}
