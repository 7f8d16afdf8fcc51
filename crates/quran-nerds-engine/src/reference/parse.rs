use std::sync::LazyLock;

use regex::Regex;

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:surah\s+)?([A-Za-z][A-Za-z\s'’\-]*?)\s+([0-9]+)(?:-([0-9]+))?$")
        .expect("valid reference regex")
});

/// A reference split into its parts, before the chapter name is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    pub chapter_name: String,
    pub start_verse: u32,
    pub end_verse: u32,
}

/// Splits `Al-Baqara 1-4` into name and verse bounds.
///
/// Returns `None` for anything that does not match the reference syntax, for
/// verse numbers of zero or beyond `u32`, and for a range whose end precedes
/// its start.
pub fn parse_reference(reference: &str) -> Option<ParsedReference> {
    let captures = REFERENCE.captures(reference.trim())?;
    let chapter_name = captures.get(1)?.as_str().trim().to_string();
    let start_verse: u32 = captures.get(2)?.as_str().parse().ok()?;
    let end_verse: u32 = match captures.get(3) {
        Some(end) => end.as_str().parse().ok()?,
        None => start_verse,
    };

    if start_verse == 0 || end_verse < start_verse {
        return None;
    }

    Some(ParsedReference {
        chapter_name,
        start_verse,
        end_verse,
    })
}
