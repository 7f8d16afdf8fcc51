use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::text::plain_text;

/// Class carried by every normalized verse block.
pub const VERSE_CLASS: &str = "quran-verse";
/// Attribute marking a verse block as already normalized.
pub const NORMALIZED_ATTR: &str = "data-verse-normalized";

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/=`]+)))?"#)
        .expect("valid attribute regex")
});

/// The kind of a top-level block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `p`, `div`, lists and any other element.
    Generic,
    /// `h1` to `h6`.
    Heading,
    /// `blockquote`.
    Quote,
    /// `pre`; raw content, never classified.
    Code,
    /// A verse block produced by an earlier normalization pass.
    Verse,
    /// Character data outside any element.
    Text,
    /// `br`, `hr`, `img` and other elements without content.
    Void,
    /// `<!-- ... -->`
    Comment,
}

/// A top-level unit of note markup.
///
/// Holds the exact source slice so that serializing an untouched block
/// reproduces its input byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Lowercased element name, `None` for text and comments.
    pub tag: Option<String>,
    outer: String,
    inner: Range<usize>,
}

impl Block {
    pub(crate) fn element(tag: String, open_tag: &str, outer: String, inner: Range<usize>) -> Self {
        let kind = classify_element(&tag, open_tag);
        Self {
            kind,
            tag: Some(tag),
            outer,
            inner,
        }
    }

    pub(crate) fn void(tag: String, outer: String) -> Self {
        let end = outer.len();
        Self {
            kind: BlockKind::Void,
            tag: Some(tag),
            outer,
            inner: end..end,
        }
    }

    pub(crate) fn text(text: String) -> Self {
        let end = text.len();
        Self {
            kind: BlockKind::Text,
            tag: None,
            outer: text,
            inner: 0..end,
        }
    }

    pub(crate) fn comment(text: String) -> Self {
        let end = text.len();
        Self {
            kind: BlockKind::Comment,
            tag: None,
            outer: text,
            inner: end..end,
        }
    }

    /// Full markup of the block including its own tags.
    pub fn outer_markup(&self) -> &str {
        &self.outer
    }

    /// Markup between the opening and closing tag.
    pub fn inner_markup(&self) -> &str {
        &self.outer[self.inner.clone()]
    }

    /// The opening tag, empty for text and comment blocks.
    pub fn open_tag(&self) -> &str {
        match self.kind {
            BlockKind::Text | BlockKind::Comment => "",
            BlockKind::Void => &self.outer,
            _ => &self.outer[..self.inner.start],
        }
    }

    /// Raw (undecoded) value of an attribute on the opening tag.
    pub fn attribute(&self, name: &str) -> Option<String> {
        attributes(self.open_tag())
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|value| value.split_whitespace().any(|c| c == class))
    }

    /// Plain-text projection of the inner markup.
    pub fn plain_text(&self) -> String {
        match self.kind {
            BlockKind::Comment | BlockKind::Void => String::new(),
            _ => plain_text(self.inner_markup()),
        }
    }

    /// True for blocks with no visible text, such as `<p><br></p>` or
    /// whitespace between elements.
    pub fn is_blank(&self) -> bool {
        match self.kind {
            BlockKind::Void => self.tag.as_deref() == Some("br"),
            BlockKind::Comment => false,
            _ => self.plain_text().is_empty(),
        }
    }

    pub fn is_verse(&self) -> bool {
        self.kind == BlockKind::Verse
    }
}

/// Parses the attributes of an open tag into `(name, value)` pairs.
///
/// Names are lowercased; values are returned undecoded. Attributes written
/// without a value get an empty string.
pub fn attributes(open_tag: &str) -> Vec<(String, String)> {
    let body = open_tag
        .trim_start_matches('<')
        .trim_end_matches('>')
        .trim_end_matches('/');
    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(body.len());

    ATTRIBUTE
        .captures_iter(&body[name_len..])
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

fn classify_element(tag: &str, open_tag: &str) -> BlockKind {
    let attrs = attributes(open_tag);
    let is_verse = attrs.iter().any(|(name, value)| {
        name == NORMALIZED_ATTR
            || (name == "class" && value.split_whitespace().any(|c| c == VERSE_CLASS))
    });
    if is_verse {
        return BlockKind::Verse;
    }

    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => BlockKind::Heading,
        "blockquote" => BlockKind::Quote,
        "pre" => BlockKind::Code,
        _ => BlockKind::Generic,
    }
}
