//! Script detection for note text.
//!
//! Only the two scripts that verse citations use are recognised:
//! - Arabic block (U+0600 to U+06FF) for verse bodies
//! - Bengali block (U+0980 to U+09FF) for Bangla translations

const ARABIC: std::ops::RangeInclusive<char> = '\u{0600}'..='\u{06FF}';
const BENGALI: std::ops::RangeInclusive<char> = '\u{0980}'..='\u{09FF}';

pub fn is_arabic_char(c: char) -> bool {
    ARABIC.contains(&c)
}

pub fn is_bengali_char(c: char) -> bool {
    BENGALI.contains(&c)
}

/// True if any character of `text` is in the Arabic block.
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(is_arabic_char)
}

/// True if any character of `text` is in the Bengali block.
pub fn contains_bengali(text: &str) -> bool {
    text.chars().any(is_bengali_char)
}
