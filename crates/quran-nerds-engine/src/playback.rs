//! Recitation audio for a resolved reference.

use std::ops::RangeInclusive;

use crate::provider::VerseDataProvider;
use crate::reference::ResolvedReference;

pub const DEFAULT_RECITER_EDITION: &str = "ar.alafasy";

/// Verse count of the longest chapter. No audio is requested past it.
pub const MAX_CHAPTER_VERSES: u32 = 286;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackEntry {
    pub chapter: u16,
    pub verse: u32,
    pub url: String,
}

/// Verses of a reference in play order, with the ones whose audio could not
/// be fetched set aside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackQueue {
    entries: Vec<PlaybackEntry>,
    skipped: Vec<u32>,
    out_of_range: Option<RangeInclusive<u32>>,
}

impl PlaybackQueue {
    /// Requests audio for every verse of `reference`, in order.
    ///
    /// A verse whose audio fails is skipped and the queue carries on. Verses
    /// past [`MAX_CHAPTER_VERSES`] cannot exist and are recorded as one
    /// out-of-range span without any request.
    pub fn build<P: VerseDataProvider>(
        provider: &P,
        reference: &ResolvedReference,
        reciter_edition: &str,
    ) -> Self {
        let mut queue = Self::default();
        let last = reference.end_verse.min(MAX_CHAPTER_VERSES);
        if reference.end_verse > MAX_CHAPTER_VERSES {
            let first = reference.start_verse.max(MAX_CHAPTER_VERSES + 1);
            log::warn!(
                "no chapter has verses {first}-{} of {reference}, not requesting them",
                reference.end_verse
            );
            queue.out_of_range = Some(first..=reference.end_verse);
        }

        for verse in reference.start_verse..=last {
            match provider.verse_audio(reference.chapter, verse, reciter_edition) {
                Ok(audio) => queue.entries.push(PlaybackEntry {
                    chapter: reference.chapter,
                    verse,
                    url: audio.url,
                }),
                Err(err) => {
                    log::warn!(
                        "skipping verse {}:{verse} in playback: {err}",
                        reference.chapter
                    );
                    queue.skipped.push(verse);
                }
            }
        }
        queue
    }

    pub fn entries(&self) -> &[PlaybackEntry] {
        &self.entries
    }

    pub fn skipped(&self) -> &[u32] {
        &self.skipped
    }

    /// Requested verses beyond the longest chapter.
    pub fn out_of_range(&self) -> Option<&RangeInclusive<u32>> {
        self.out_of_range.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry after the one for `verse`, for advancing when a verse ends.
    pub fn next_after(&self, verse: u32) -> Option<&PlaybackEntry> {
        self.entries.iter().find(|entry| entry.verse > verse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::FakeProvider;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::Ordering;

    fn al_asr() -> ResolvedReference {
        ResolvedReference {
            chapter: 103,
            start_verse: 1,
            end_verse: 3,
        }
    }

    #[test]
    fn queues_verses_in_order() {
        let provider = FakeProvider::default()
            .with_audio(103, 3, "https://a/6219.mp3")
            .with_audio(103, 1, "https://a/6217.mp3")
            .with_audio(103, 2, "https://a/6218.mp3");

        let queue = PlaybackQueue::build(&provider, &al_asr(), DEFAULT_RECITER_EDITION);

        let verses: Vec<u32> = queue.entries().iter().map(|e| e.verse).collect();
        assert_eq!(verses, vec![1, 2, 3]);
        assert_eq!(queue.entries()[0].url, "https://a/6217.mp3");
        assert!(queue.skipped().is_empty());
    }

    #[test]
    fn skips_verses_without_audio() {
        let provider = FakeProvider::default()
            .with_audio(103, 1, "https://a/6217.mp3")
            .with_audio(103, 3, "https://a/6219.mp3");

        let queue = PlaybackQueue::build(&provider, &al_asr(), DEFAULT_RECITER_EDITION);

        assert_eq!(queue.entries().len(), 2);
        assert_eq!(queue.skipped(), &[2]);
        assert_eq!(queue.next_after(1).map(|e| e.verse), Some(3));
        assert_eq!(queue.next_after(3), None);
    }

    #[test]
    fn huge_range_stops_at_the_longest_chapter() {
        let provider = FakeProvider::default().with_audio(2, 286, "https://a/1075.mp3");
        let reference = ResolvedReference {
            chapter: 2,
            start_verse: 280,
            end_verse: u32::MAX,
        };

        let queue = PlaybackQueue::build(&provider, &reference, DEFAULT_RECITER_EDITION);

        assert_eq!(queue.entries().len(), 1);
        assert_eq!(queue.entries()[0].verse, 286);
        assert_eq!(queue.skipped(), &[280, 281, 282, 283, 284, 285]);
        assert_eq!(queue.out_of_range(), Some(&(287..=u32::MAX)));
        assert_eq!(provider.audio_calls.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn range_entirely_past_the_longest_chapter_requests_nothing() {
        let provider = FakeProvider::default();
        let reference = ResolvedReference {
            chapter: 2,
            start_verse: 1_000,
            end_verse: 4_000_000_000,
        };

        let queue = PlaybackQueue::build(&provider, &reference, DEFAULT_RECITER_EDITION);

        assert!(queue.is_empty());
        assert!(queue.skipped().is_empty());
        assert_eq!(queue.out_of_range(), Some(&(1_000..=4_000_000_000)));
        assert_eq!(provider.audio_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn all_failed_is_empty() {
        let queue = PlaybackQueue::build(&FakeProvider::default(), &al_asr(), "ar.alafasy");
        assert!(queue.is_empty());
        assert_eq!(queue.skipped(), &[1, 2, 3]);
    }
}
