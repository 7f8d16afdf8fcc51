use crate::markup::Block;

use super::{block::VerseBlock, classify::LineClass};

/// A verse citation being assembled during a normalization pass.
///
/// Keeps every source block it consumed, in order, so that an incomplete
/// citation can be given back unchanged. Blank and comment blocks are never
/// merged into the verse: those between citation lines are set aside in
/// `between`, those after the last consumed line in `trailing`.
#[derive(Debug, Clone)]
pub struct Citation {
    reference: String,
    arabic: Option<String>,
    english: Option<String>,
    bangla: Option<String>,
    held: Vec<Block>,
    between: Vec<Block>,
    trailing: Vec<Block>,
}

impl Citation {
    pub fn open(reference: String, block: Block) -> Self {
        Self {
            reference,
            arabic: None,
            english: None,
            bangla: None,
            held: vec![block],
            between: vec![],
            trailing: vec![],
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn has_arabic(&self) -> bool {
        self.arabic.is_some()
    }

    pub fn has_english(&self) -> bool {
        self.english.is_some()
    }

    pub fn has_bangla(&self) -> bool {
        self.bangla.is_some()
    }

    pub fn set_arabic(&mut self, block: Block) {
        self.arabic = Some(block.inner_markup().to_string());
        self.take(block);
    }

    pub fn set_english(&mut self, block: Block) {
        self.english = Some(block.inner_markup().to_string());
        self.take(block);
    }

    pub fn set_bangla(&mut self, block: Block) {
        self.bangla = Some(block.inner_markup().to_string());
        self.take(block);
    }

    /// Offers a non-reference block to the citation.
    ///
    /// Arabic takes priority over translations; each payload slot is filled
    /// at most once. A block that fits no open slot is handed back.
    pub fn accept(&mut self, class: LineClass, block: Block) -> Result<(), Block> {
        if class.arabic && !self.has_arabic() {
            self.set_arabic(block);
        } else if class.english && !self.has_english() {
            self.set_english(block);
        } else if class.bangla && !self.has_bangla() {
            self.set_bangla(block);
        } else {
            return Err(block);
        }
        Ok(())
    }

    fn take(&mut self, block: Block) {
        self.between.extend(self.trailing.iter().cloned());
        self.held.append(&mut self.trailing);
        self.held.push(block);
    }

    /// Keeps a blank or comment block seen while the citation is open.
    pub fn hold(&mut self, block: Block) {
        self.trailing.push(block);
    }

    /// Closes the citation into a verse block and the held blocks to emit
    /// after it: those from between its lines, then those that followed it.
    ///
    /// Without an Arabic payload the citation never happened: the consumed
    /// blocks come back in their original order.
    pub fn close(mut self) -> Result<(VerseBlock, Vec<Block>), Vec<Block>> {
        match self.arabic {
            Some(arabic_markup) => {
                self.between.append(&mut self.trailing);
                let verse = VerseBlock {
                    reference: self.reference,
                    arabic_markup,
                    english_markup: self.english,
                    bangla_markup: self.bangla,
                };
                Ok((verse, self.between))
            }
            None => {
                self.held.append(&mut self.trailing);
                Err(self.held)
            }
        }
    }
}
