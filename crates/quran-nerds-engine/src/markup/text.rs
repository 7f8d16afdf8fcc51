use super::lexer::{TokenKind, lex};

/// Default excerpt length in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

/// Plain-text projection of a markup fragment.
///
/// Tags and comments are dropped, entities decoded, and runs of whitespace
/// collapsed to a single space. Like a DOM's `textContent`, adjacent elements
/// are joined without inserting separators.
pub fn plain_text(markup: &str) -> String {
    let mut raw = String::with_capacity(markup.len());
    for token in lex(markup) {
        if matches!(token.kind, TokenKind::Text | TokenKind::Lt) {
            raw.push_str(token.text);
        }
    }

    let decoded = html_escape::decode_html_entities(&raw);
    collapse_whitespace(&decoded)
}

/// Plain-text excerpt of at most `max_chars` characters.
///
/// Longer text is cut back to the last word boundary and suffixed with `...`.
pub fn excerpt(markup: &str, max_chars: usize) -> String {
    let text = plain_text(markup);
    if text.chars().count() <= max_chars {
        return text;
    }

    let truncated: String = text.chars().take(max_chars).collect();
    match truncated.rfind(' ') {
        Some(last_space) if last_space > 0 => format!("{}...", &truncated[..last_space]),
        _ => format!("{truncated}..."),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
