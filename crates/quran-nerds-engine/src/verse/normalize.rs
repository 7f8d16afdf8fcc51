use crate::markup::{Block, BlockKind, parse_blocks, serialize_blocks};

use super::{
    citation::Citation,
    classify::{LineClass, VerseLineClassifier},
};

/// Outcome of normalizing a note body.
///
/// Normalization is best-effort: either the markup was rewritten, or the
/// original text comes back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalization {
    Rewritten(String),
    Unchanged(String),
}

impl Normalization {
    pub fn markup(&self) -> &str {
        match self {
            Normalization::Rewritten(markup) | Normalization::Unchanged(markup) => markup,
        }
    }

    pub fn into_markup(self) -> String {
        match self {
            Normalization::Rewritten(markup) | Normalization::Unchanged(markup) => markup,
        }
    }

    pub fn is_rewritten(&self) -> bool {
        matches!(self, Normalization::Rewritten(_))
    }
}

/// Rewrites verse citations in a note body into verse blocks.
///
/// Malformed markup is returned unchanged.
pub fn normalize_markup(markup: &str) -> Normalization {
    let blocks = match parse_blocks(markup) {
        Ok(blocks) => blocks,
        Err(err) => {
            log::debug!("leaving note markup unchanged: {err}");
            return Normalization::Unchanged(markup.to_string());
        }
    };

    let out = serialize_blocks(&normalize_blocks(blocks));
    if out == markup {
        Normalization::Unchanged(out)
    } else {
        Normalization::Rewritten(out)
    }
}

/// Rewrites verse citations in a block list into verse blocks.
pub fn normalize_blocks(blocks: Vec<Block>) -> Vec<Block> {
    let mut normalizer = VerseNormalizer::new();
    for block in blocks {
        normalizer.push(block);
    }
    normalizer.finish()
}

/// Single forward pass over top-level blocks with at most one open citation.
///
/// For each block, in priority order:
///
/// 1. verse blocks from earlier passes close any open citation and pass through
/// 2. blank and comment blocks pass through, or are held while a citation is open
/// 3. a reference line closes any open citation and opens a new one
/// 4. an open citation may take the block as Arabic, English or Bangla payload
/// 5. anything else closes the open citation and passes through
///
/// Closing a citation emits a verse block if it has Arabic, and otherwise
/// re-emits the blocks it consumed. Held blocks are never lost: after a verse
/// block they follow it in their original order.
pub struct VerseNormalizer {
    classifier: VerseLineClassifier,
    open: Option<Citation>,
    out: Vec<Block>,
    verses: usize,
}

impl VerseNormalizer {
    pub fn new() -> Self {
        Self {
            classifier: VerseLineClassifier,
            open: None,
            out: vec![],
            verses: 0,
        }
    }

    pub fn push(&mut self, block: Block) {
        if block.is_verse() {
            self.passthrough(block);
            return;
        }

        if block.is_blank() || block.kind == BlockKind::Comment {
            match self.open.as_mut() {
                Some(citation) => citation.hold(block),
                None => self.out.push(block),
            }
            return;
        }

        let class = self.classify(&block);
        if class.reference {
            self.close_citation();
            self.open = Some(Citation::open(block.plain_text(), block));
            return;
        }

        let rejected = match self.open.as_mut() {
            Some(citation) => citation.accept(class, block).err(),
            None => Some(block),
        };
        if let Some(block) = rejected {
            self.passthrough(block);
        }
    }

    /// Number of verse blocks emitted so far.
    pub fn verses_built(&self) -> usize {
        self.verses
    }

    pub fn finish(mut self) -> Vec<Block> {
        // EOF flush
        self.close_citation();
        self.out
    }

    fn classify(&self, block: &Block) -> LineClass {
        match block.kind {
            BlockKind::Code | BlockKind::Comment | BlockKind::Void => LineClass::default(),
            _ => self.classifier.classify(&block.plain_text()),
        }
    }

    fn passthrough(&mut self, block: Block) {
        self.close_citation();
        self.out.push(block);
    }

    fn close_citation(&mut self) {
        let Some(citation) = self.open.take() else {
            return;
        };
        let reference = citation.reference().to_string();
        match citation.close() {
            Ok((verse, held)) => {
                log::debug!("built verse block for {reference:?}");
                self.verses += 1;
                self.out.push(verse.into_block());
                self.out.extend(held);
            }
            Err(held) => {
                log::debug!("dropping citation {reference:?}: no Arabic text followed it");
                self.out.extend(held);
            }
        }
    }
}

impl Default for VerseNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
