//! # Note Markup
//!
//! A small, DOM-free view of the HTML stored in note bodies.
//!
//! ## Parsing Phases
//!
//! 1. **Lexing** (`lexer`): the fragment is split into open tags, close tags,
//!    comments and character data. Lossless: every byte lands in one token.
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` tracks the element
//!    stack and emits a `Block` each time a top-level element closes.
//!
//! ## Key Invariants
//!
//! - `serialize_blocks(&parse_blocks(s)?) == s` for any input that parses
//! - Blocks keep their source slice; nothing is re-rendered unless replaced
//! - Malformed input is an error, never a best guess
//!
//! This is not a sanitizer and not a general HTML5 parser: it knows void
//! elements and implicit closing of inner elements, and nothing more.

pub mod block;
pub mod builder;
pub mod lexer;
pub mod text;

pub use block::{Block, BlockKind, NORMALIZED_ATTR, VERSE_CLASS, attributes};
pub use builder::BlockBuilder;
pub use text::{DEFAULT_EXCERPT_LENGTH, excerpt, plain_text};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("closing tag </{tag}> at byte {offset} has no open element")]
    UnexpectedClose { tag: String, offset: usize },
    #[error("closing tag </{tag}> at byte {offset} does not match any open element")]
    MismatchedClose { tag: String, offset: usize },
    #[error("element <{tag}> opened at byte {offset} is never closed")]
    Unterminated { tag: String, offset: usize },
    #[error("comment at byte {offset} is never closed")]
    UnterminatedComment { offset: usize },
}

/// Splits a markup fragment into top-level blocks.
pub fn parse_blocks(markup: &str) -> Result<Vec<Block>, MarkupError> {
    let mut builder = BlockBuilder::new(markup);
    for token in lexer::lex(markup) {
        builder.push(&token)?;
    }
    builder.finish()
}

/// Joins blocks back into a markup fragment.
pub fn serialize_blocks(blocks: &[Block]) -> String {
    blocks.iter().map(Block::outer_markup).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(blocks: &[Block]) -> Vec<BlockKind> {
        blocks.iter().map(|b| b.kind).collect()
    }

    #[test]
    fn empty_document() {
        assert!(parse_blocks("").unwrap().is_empty());
    }

    #[test]
    fn paragraphs_and_whitespace() {
        let blocks = parse_blocks("<p>one</p>\n<p>two</p>").unwrap();
        assert_eq!(
            kinds(&blocks),
            vec![BlockKind::Generic, BlockKind::Text, BlockKind::Generic]
        );
        assert_eq!(blocks[0].inner_markup(), "one");
        assert_eq!(blocks[2].outer_markup(), "<p>two</p>");
    }

    #[test]
    fn nested_elements_stay_in_one_block() {
        let markup = "<ul><li>a</li><li><b>b</b></li></ul><h2>Title</h2>";
        let blocks = parse_blocks(markup).unwrap();
        assert_eq!(kinds(&blocks), vec![BlockKind::Generic, BlockKind::Heading]);
        assert_eq!(blocks[0].inner_markup(), "<li>a</li><li><b>b</b></li>");
        assert_eq!(blocks[0].plain_text(), "ab");
    }

    #[test]
    fn void_and_self_closing_elements() {
        let blocks = parse_blocks("<br><hr/><img src=\"x.png\" /><p>x<br>y</p>").unwrap();
        assert_eq!(
            kinds(&blocks),
            vec![
                BlockKind::Void,
                BlockKind::Void,
                BlockKind::Void,
                BlockKind::Generic
            ]
        );
        assert_eq!(blocks[3].inner_markup(), "x<br>y");
    }

    #[test]
    fn implicitly_closed_inner_elements() {
        let blocks = parse_blocks("<ul><li>a<li>b</ul>").unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].inner_markup(), "<li>a<li>b");
    }

    #[test]
    fn verse_blocks_are_recognised() {
        let markup = r#"<div class="quran-verse"><div class="verse-arabic"><p>x</p></div></div>"#;
        let blocks = parse_blocks(markup).unwrap();
        assert_eq!(kinds(&blocks), vec![BlockKind::Verse]);
    }

    #[test]
    fn serialization_is_lossless() {
        let markup = "intro <b>bold</b>\n<!-- c -->\n<p class='x'>a &amp; b</p><pre>1 < 2</pre>";
        let blocks = parse_blocks(markup).unwrap();
        assert_eq!(serialize_blocks(&blocks), markup);
    }

    #[test]
    fn stray_close_is_an_error() {
        assert_eq!(
            parse_blocks("<p>a</p></div>"),
            Err(MarkupError::UnexpectedClose {
                tag: "div".into(),
                offset: 8
            })
        );
    }

    #[test]
    fn mismatched_close_is_an_error() {
        assert!(matches!(
            parse_blocks("<p>a</span></p>"),
            Err(MarkupError::MismatchedClose { .. })
        ));
    }

    #[test]
    fn unclosed_element_is_an_error() {
        assert_eq!(
            parse_blocks("<p>ok</p><div>open"),
            Err(MarkupError::Unterminated {
                tag: "div".into(),
                offset: 9
            })
        );
    }

    #[test]
    fn unclosed_comment_is_an_error() {
        assert!(matches!(
            parse_blocks("<p>a</p><!-- oops"),
            Err(MarkupError::UnterminatedComment { offset: 8 })
        ));
    }
}
