use std::fmt;
use std::ops::RangeInclusive;

use super::chapters::{ChapterIndex, ChapterIndexCache};
use super::parse::parse_reference;
use crate::provider::VerseDataProvider;

/// A reference pinned to a chapter number and an inclusive verse range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedReference {
    pub chapter: u16,
    pub start_verse: u32,
    pub end_verse: u32,
}

impl ResolvedReference {
    pub fn verses(&self) -> RangeInclusive<u32> {
        self.start_verse..=self.end_verse
    }

    pub fn verse_count(&self) -> u32 {
        self.end_verse - self.start_verse + 1
    }
}

/// `2:255` for a single verse, `2:1-4` for a range.
impl fmt::Display for ResolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_verse == self.end_verse {
            write!(f, "{}:{}", self.chapter, self.start_verse)
        } else {
            write!(f, "{}:{}-{}", self.chapter, self.start_verse, self.end_verse)
        }
    }
}

/// Resolves `reference` against an index the caller already holds.
pub fn resolve_with(index: &ChapterIndex, reference: &str) -> Option<ResolvedReference> {
    let parsed = parse_reference(reference)?;
    let chapter = index.lookup(&parsed.chapter_name)?;
    Some(ResolvedReference {
        chapter,
        start_verse: parsed.start_verse,
        end_verse: parsed.end_verse,
    })
}

/// Turns human-readable references into [`ResolvedReference`]s, loading the
/// chapter index through its cache on first use.
#[derive(Debug)]
pub struct VerseReferenceResolver<P> {
    cache: ChapterIndexCache<P>,
}

impl<P: VerseDataProvider + Send + Sync + 'static> VerseReferenceResolver<P> {
    pub fn new(cache: ChapterIndexCache<P>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ChapterIndexCache<P> {
        &self.cache
    }

    /// `None` when the reference is malformed, the chapter name is unknown, or
    /// the chapter index could not be loaded.
    pub fn resolve(&self, reference: &str) -> Option<ResolvedReference> {
        // Malformed input never costs a fetch.
        parse_reference(reference)?;
        let index = self.cache.index()?;
        let resolved = resolve_with(&index, reference);
        if resolved.is_none() {
            log::debug!("no chapter matches reference {reference:?}");
        }
        resolved
    }
}
