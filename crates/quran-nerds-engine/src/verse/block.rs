use crate::markup::{Block, NORMALIZED_ATTR, VERSE_CLASS, parse_blocks};

const HEADER_CLASS: &str = "verse-header";
const ARABIC_CLASS: &str = "verse-arabic";
const TRANSLATION_CLASS: &str = "verse-translation";
const ENGLISH_CLASS: &str = "verse-english";
const BANGLA_CLASS: &str = "verse-bangla";
const REFERENCE_ATTR: &str = "data-reference";

/// A finalized verse citation in its stored form.
///
/// The markup shape is what older notes were saved with, so field order and
/// class names must stay stable:
///
/// ```text
/// div.quran-verse[data-verse-normalized]
///   div.verse-header[data-reference]
///     span.verse-reference
///   div.verse-arabic
///   div.verse-translation        (only with a translation)
///     p.verse-english            (optional)
///     p.verse-bangla             (optional)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseBlock {
    /// Reference as the author wrote it, unescaped.
    pub reference: String,
    pub arabic_markup: String,
    pub english_markup: Option<String>,
    pub bangla_markup: Option<String>,
}

impl VerseBlock {
    fn open_tag() -> String {
        format!(r#"<div class="{VERSE_CLASS}" {NORMALIZED_ATTR}="true">"#)
    }

    /// Renders the block as stored markup.
    pub fn to_markup(&self) -> String {
        let mut out = Self::open_tag();
        out.push_str(&self.inner_markup());
        out.push_str("</div>");
        out
    }

    fn inner_markup(&self) -> String {
        let attr = html_escape::encode_double_quoted_attribute(&self.reference);
        let label = html_escape::encode_text(&self.reference);

        let mut out = format!(
            r#"<div class="{HEADER_CLASS}" {REFERENCE_ATTR}="{attr}"><span class="verse-reference">{label}</span></div>"#
        );
        out.push_str(&format!(
            r#"<div class="{ARABIC_CLASS}">{}</div>"#,
            self.arabic_markup
        ));

        if self.english_markup.is_some() || self.bangla_markup.is_some() {
            out.push_str(&format!(r#"<div class="{TRANSLATION_CLASS}">"#));
            if let Some(english) = &self.english_markup {
                out.push_str(&format!(r#"<p class="{ENGLISH_CLASS}">{english}</p>"#));
            }
            if let Some(bangla) = &self.bangla_markup {
                out.push_str(&format!(r#"<p class="{BANGLA_CLASS}">{bangla}</p>"#));
            }
            out.push_str("</div>");
        }
        out
    }

    /// Converts into a top-level block for splicing into a block list.
    pub fn into_block(self) -> Block {
        let open_tag = Self::open_tag();
        let inner = self.inner_markup();
        let inner_range = open_tag.len()..open_tag.len() + inner.len();
        let outer = format!("{open_tag}{inner}</div>");
        Block::element("div".to_string(), &open_tag, outer, inner_range)
    }

    /// Reads a verse block back from stored markup.
    ///
    /// Returns `None` for blocks that are not verse blocks or that lack a
    /// reference header or Arabic body.
    pub fn from_block(block: &Block) -> Option<Self> {
        if !block.is_verse() {
            return None;
        }
        let parts = parse_blocks(block.inner_markup()).ok()?;

        let header = parts.iter().find(|b| b.has_class(HEADER_CLASS))?;
        let reference = header
            .attribute(REFERENCE_ATTR)
            .map(|raw| html_escape::decode_html_entities(&raw).into_owned())
            .unwrap_or_else(|| header.plain_text());
        let arabic_markup = parts
            .iter()
            .find(|b| b.has_class(ARABIC_CLASS))?
            .inner_markup()
            .to_string();

        let mut english_markup = None;
        let mut bangla_markup = None;
        if let Some(translation) = parts.iter().find(|b| b.has_class(TRANSLATION_CLASS))
            && let Ok(paragraphs) = parse_blocks(translation.inner_markup())
        {
            for p in &paragraphs {
                if p.has_class(ENGLISH_CLASS) {
                    english_markup = Some(p.inner_markup().to_string());
                } else if p.has_class(BANGLA_CLASS) {
                    bangla_markup = Some(p.inner_markup().to_string());
                }
            }
        }

        Some(Self {
            reference,
            arabic_markup,
            english_markup,
            bangla_markup,
        })
    }
}

/// References of every verse block in a note, in document order.
///
/// Malformed markup yields no references.
pub fn verse_references(markup: &str) -> Vec<String> {
    let Ok(blocks) = parse_blocks(markup) else {
        log::debug!("note markup does not parse; no verse references extracted");
        return vec![];
    };
    blocks
        .iter()
        .filter_map(VerseBlock::from_block)
        .map(|verse| verse.reference)
        .collect()
}
