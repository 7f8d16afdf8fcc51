//! # Lexer - Tokenizing Note Markup
//!
//! Breaks an HTML fragment into a flat token stream using the [Logos] lexer
//! generator. The block builder then groups tokens into top-level blocks.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input appears in exactly one token. Nothing is skipped,
//! so concatenating token texts reproduces the input:
//!
//! ```
//! use quran_nerds_engine::markup::lexer::lex;
//!
//! let input = "<p>In the name of God</p>\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are context-free. The lexer does not know which tags are void
//! elements or where a block ends; that is the builder's job. A `<` that
//! does not start a well-formed tag becomes [`TokenKind::Lt`] and is treated
//! as text downstream.

use logos::{Lexer, Logos};

/// Token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<!-- ... -->`
    #[token("<!--", lex_comment)]
    Comment,

    /// `</name>`
    #[regex(r"</[A-Za-z][A-Za-z0-9-]*[ \t\r\n]*>")]
    CloseTag,

    /// `<name attr="value">` or `<name />`
    #[regex(r#"<[A-Za-z][A-Za-z0-9-]*([^>"']|"[^"]*"|'[^']*')*>"#)]
    OpenTag,

    /// A `<` that does not start a tag
    #[token("<")]
    Lt,

    /// Character data between tags
    #[regex(r"[^<]+")]
    Text,
}

fn lex_comment(lex: &mut Lexer<TokenKind>) -> bool {
    match lex.remainder().find("-->") {
        Some(end) => {
            lex.bump(end + 3);
            true
        }
        None => false,
    }
}

/// A lexed token with its kind, text slice and byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Lex the input into a sequence of tokens.
///
/// An unterminated comment surfaces as [`TokenKind::Comment`] running to the
/// end of input; the builder reports it as an error.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                text: lexer.slice(),
                start: span.start,
            }),
            Err(()) => {
                // Only an unclosed comment fails to lex; swallow the rest so
                // the builder can see it.
                let start = span.start;
                tokens.push(Token {
                    kind: TokenKind::Comment,
                    text: &input[start..],
                    start,
                });
                break;
            }
        }
    }

    tokens
}

/// Tag name of an open or close tag token, lowercased.
pub fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('<')
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Whether an open tag is written self-closing (`<br/>`, `<img ... />`).
pub fn is_self_closing(tag: &str) -> bool {
    tag.trim_end_matches('>').trim_end().ends_with('/')
}
