use super::{
    MarkupError,
    block::Block,
    lexer::{Token, TokenKind, is_self_closing, tag_name},
};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

#[derive(Debug)]
struct OpenElement {
    tag: String,
    start: usize,
    open_tag_end: usize,
}

/// Groups lexer tokens into top-level blocks.
///
/// Tracks an element stack; a block is emitted whenever the stack returns to
/// empty. Character data between top-level elements is kept as text blocks so
/// that the block list serializes back to the exact input.
pub struct BlockBuilder<'a> {
    input: &'a str,
    element: Option<OpenElement>,
    stack: Vec<String>,
    text_start: Option<usize>,
    out: Vec<Block>,
}

impl<'a> BlockBuilder<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            element: None,
            stack: vec![],
            text_start: None,
            out: vec![],
        }
    }

    pub fn push(&mut self, token: &Token<'a>) -> Result<(), MarkupError> {
        if token.kind == TokenKind::Comment && !token.text.ends_with("-->") {
            return Err(MarkupError::UnterminatedComment {
                offset: token.start,
            });
        }

        if self.stack.is_empty() {
            self.push_top_level(token)
        } else {
            self.push_nested(token)
        }
    }

    pub fn finish(mut self) -> Result<Vec<Block>, MarkupError> {
        if let Some(tag) = self.stack.first() {
            return Err(MarkupError::Unterminated {
                tag: tag.clone(),
                offset: self.element.as_ref().map_or(0, |e| e.start),
            });
        }
        self.flush_text(self.input.len());
        Ok(self.out)
    }

    fn push_top_level(&mut self, token: &Token<'a>) -> Result<(), MarkupError> {
        match token.kind {
            TokenKind::Text | TokenKind::Lt => {
                self.text_start.get_or_insert(token.start);
            }
            TokenKind::Comment => {
                self.flush_text(token.start);
                self.out.push(Block::comment(token.text.to_string()));
            }
            TokenKind::OpenTag => {
                self.flush_text(token.start);
                let tag = tag_name(token.text);
                if is_void(&tag) || is_self_closing(token.text) {
                    self.out.push(Block::void(tag, token.text.to_string()));
                } else {
                    self.element = Some(OpenElement {
                        tag: tag.clone(),
                        start: token.start,
                        open_tag_end: token.end(),
                    });
                    self.stack.push(tag);
                }
            }
            TokenKind::CloseTag => {
                return Err(MarkupError::UnexpectedClose {
                    tag: tag_name(token.text),
                    offset: token.start,
                });
            }
        }
        Ok(())
    }

    fn push_nested(&mut self, token: &Token<'a>) -> Result<(), MarkupError> {
        match token.kind {
            TokenKind::OpenTag => {
                let tag = tag_name(token.text);
                if !is_void(&tag) && !is_self_closing(token.text) {
                    self.stack.push(tag);
                }
            }
            TokenKind::CloseTag => {
                let tag = tag_name(token.text);
                // Closing an outer element implicitly closes unterminated
                // inner ones (`<ul><li>a</ul>`).
                let Some(depth) = self.stack.iter().rposition(|open| *open == tag) else {
                    return Err(MarkupError::MismatchedClose {
                        tag,
                        offset: token.start,
                    });
                };
                self.stack.truncate(depth);
                if self.stack.is_empty() {
                    self.close_element(token);
                }
            }
            TokenKind::Text | TokenKind::Lt | TokenKind::Comment => {}
        }
        Ok(())
    }

    fn close_element(&mut self, close: &Token<'a>) {
        let Some(open) = self.element.take() else {
            return;
        };
        let outer = self.input[open.start..close.end()].to_string();
        let open_tag = &self.input[open.start..open.open_tag_end];
        let inner = (open.open_tag_end - open.start)..(close.start - open.start);
        self.out.push(Block::element(open.tag, open_tag, outer, inner));
    }

    fn flush_text(&mut self, end: usize) {
        if let Some(start) = self.text_start.take()
            && start < end
        {
            self.out.push(Block::text(self.input[start..end].to_string()));
        }
    }
}
