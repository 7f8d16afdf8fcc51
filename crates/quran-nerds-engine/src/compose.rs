//! Builds a verse block from a chapter and verse selection by fetching the
//! Arabic text and both translations from a provider.

use crate::provider::{CHAPTER_COUNT, ProviderError, VerseDataProvider, VerseText};
use crate::verse::VerseBlock;

pub const DEFAULT_ARABIC_EDITION: &str = "ar.asad";
pub const DEFAULT_ENGLISH_EDITION: &str = "en.asad";
pub const DEFAULT_BANGLA_EDITION: &str = "bn.bengali";

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("enter both a chapter number and a verse number")]
    MissingInput,
    #[error("chapter number must be between 1 and {CHAPTER_COUNT}, got {0:?}")]
    InvalidChapter(String),
    #[error("verse number must be a positive number, got {0:?}")]
    InvalidVerse(String),
    #[error("invalid verse range {0:?}, use a format like 1-4")]
    InvalidRange(String),
    #[error("range start {start} is after range end {end}")]
    ReversedRange { start: u32, end: u32 },
    #[error("could not fetch {edition} text for verse {chapter}:{verse}: {source}")]
    Fetch {
        chapter: u16,
        verse: u32,
        edition: String,
        source: ProviderError,
    },
}

/// Text editions fetched for a composed verse block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editions {
    pub arabic: String,
    pub english: String,
    pub bangla: String,
}

impl Default for Editions {
    fn default() -> Self {
        Self {
            arabic: DEFAULT_ARABIC_EDITION.to_string(),
            english: DEFAULT_ENGLISH_EDITION.to_string(),
            bangla: DEFAULT_BANGLA_EDITION.to_string(),
        }
    }
}

/// A validated chapter and inclusive verse range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseSelection {
    pub chapter: u16,
    pub start_verse: u32,
    pub end_verse: u32,
}

impl VerseSelection {
    /// Validates user input: a chapter number and either `5` or `1-4`.
    pub fn parse(chapter: &str, verses: &str) -> Result<Self, ComposeError> {
        let (chapter, verses) = (chapter.trim(), verses.trim());
        if chapter.is_empty() || verses.is_empty() {
            return Err(ComposeError::MissingInput);
        }

        let chapter_number = chapter
            .parse::<u16>()
            .ok()
            .filter(|n| (1..=CHAPTER_COUNT).contains(n))
            .ok_or_else(|| ComposeError::InvalidChapter(chapter.to_string()))?;

        let (start_verse, end_verse) = match verses.split_once('-') {
            Some((start, end)) => {
                let bound = |s: &str| s.trim().parse::<u32>().ok().filter(|n| *n > 0);
                match (bound(start), bound(end)) {
                    (Some(start), Some(end)) if start > end => {
                        return Err(ComposeError::ReversedRange { start, end });
                    }
                    (Some(start), Some(end)) => (start, end),
                    _ => return Err(ComposeError::InvalidRange(verses.to_string())),
                }
            }
            None => {
                let verse = verses
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| ComposeError::InvalidVerse(verses.to_string()))?;
                (verse, verse)
            }
        };

        Ok(Self {
            chapter: chapter_number,
            start_verse,
            end_verse,
        })
    }

    /// `5` or `1-4`.
    pub fn verse_label(&self) -> String {
        if self.start_verse == self.end_verse {
            self.start_verse.to_string()
        } else {
            format!("{}-{}", self.start_verse, self.end_verse)
        }
    }
}

/// Fetches verse texts and renders them as a [`VerseBlock`].
#[derive(Debug)]
pub struct VerseComposer<P> {
    provider: P,
    editions: Editions,
}

impl<P: VerseDataProvider> VerseComposer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            editions: Editions::default(),
        }
    }

    pub fn with_editions(mut self, editions: Editions) -> Self {
        self.editions = editions;
        self
    }

    pub fn editions(&self) -> &Editions {
        &self.editions
    }

    /// Validates the input and composes the verse block.
    pub fn compose(&self, chapter: &str, verses: &str) -> Result<VerseBlock, ComposeError> {
        let selection = VerseSelection::parse(chapter, verses)?;
        self.compose_selection(&selection)
    }

    /// Composes an already validated selection. Any failed fetch aborts.
    pub fn compose_selection(&self, selection: &VerseSelection) -> Result<VerseBlock, ComposeError> {
        let mut chapter_name = None;
        let mut arabic = Vec::new();
        let mut english = Vec::new();
        let mut bangla = Vec::new();

        for verse in selection.start_verse..=selection.end_verse {
            let arabic_text = self.fetch(selection.chapter, verse, &self.editions.arabic)?;
            if chapter_name.is_none() {
                chapter_name = arabic_text.chapter_name;
            }
            arabic.push(arabic_text.text);
            english.push(
                self.fetch(selection.chapter, verse, &self.editions.english)?
                    .text,
            );
            bangla.push(self.fetch(selection.chapter, verse, &self.editions.bangla)?.text);
        }

        let chapter_name = chapter_name.unwrap_or_else(|| format!("Surah {}", selection.chapter));
        let reference = format!("{chapter_name} {}", selection.verse_label());
        log::debug!("composed {reference} from {} verses", arabic.len());

        Ok(VerseBlock {
            reference,
            arabic_markup: escape_joined(&arabic),
            english_markup: Some(format!(
                "<strong>English:</strong> {}",
                escape_joined(&english)
            )),
            bangla_markup: Some(format!(
                "<strong>বাংলা:</strong> {}",
                escape_joined(&bangla)
            )),
        })
    }

    fn fetch(
        &self,
        chapter: u16,
        verse: u32,
        edition: &str,
    ) -> Result<VerseText, ComposeError> {
        self.provider
            .verse(chapter, verse, edition)
            .map_err(|source| ComposeError::Fetch {
                chapter,
                verse,
                edition: edition.to_string(),
                source,
            })
    }
}

fn escape_joined(texts: &[String]) -> String {
    html_escape::encode_text(&texts.join(" ")).into_owned()
}
