use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

use crate::provider::{ChapterInfo, ProviderError, VerseAudio, VerseDataProvider, VerseText};

/// Create a temporary notes directory
pub fn create_test_notes_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test note with content, creating parent directories
pub fn create_test_file(notes_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = notes_dir.path().join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Write an upstream document into a mirror directory
pub fn write_mirror_file(mirror_dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    create_test_file(mirror_dir, relative, content)
}

/// Chapters as quran.com names them.
pub fn sample_chapters() -> Vec<ChapterInfo> {
    vec![
        ChapterInfo::new(1, "Al-Fatihah"),
        ChapterInfo::new(2, "Al-Baqarah"),
        ChapterInfo::new(36, "Ya-Sin"),
        ChapterInfo::new(55, "Ar-Rahman"),
        ChapterInfo::new(112, "Al-Ikhlas"),
        ChapterInfo::new(114, "An-Nas"),
    ]
}

/// In-memory provider that counts calls and can be told to fail.
#[derive(Debug, Default)]
pub struct FakeProvider {
    pub chapters: Vec<ChapterInfo>,
    /// Number of upcoming `chapters()` calls that fail.
    pub fail_chapters: AtomicUsize,
    pub chapter_calls: AtomicUsize,
    pub delay: Duration,
    /// Keyed by `(chapter, verse, edition)`.
    pub verses: HashMap<(u16, u32, String), VerseText>,
    pub audio: HashMap<(u16, u32), VerseAudio>,
    pub verse_calls: AtomicUsize,
    pub audio_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn with_chapters(chapters: Vec<ChapterInfo>) -> Self {
        Self {
            chapters,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_verse(mut self, chapter: u16, verse: u32, edition: &str, text: &str) -> Self {
        let chapter_name = self
            .chapters
            .iter()
            .find(|c| c.number == chapter)
            .map(|c| c.name.clone());
        self.verses.insert(
            (chapter, verse, edition.to_string()),
            VerseText {
                chapter,
                verse,
                chapter_name,
                text: text.to_string(),
            },
        );
        self
    }

    pub fn with_audio(mut self, chapter: u16, verse: u32, url: &str) -> Self {
        self.audio.insert(
            (chapter, verse),
            VerseAudio {
                url: url.to_string(),
                fallbacks: vec![],
            },
        );
        self
    }
}

impl VerseDataProvider for FakeProvider {
    fn chapters(&self) -> Result<Vec<ChapterInfo>, ProviderError> {
        self.chapter_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let failing = self
            .fail_chapters
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(ProviderError::Status {
                code: 503,
                status: "Service Unavailable".into(),
            });
        }
        Ok(self.chapters.clone())
    }

    fn verse(&self, chapter: u16, verse: u32, edition: &str) -> Result<VerseText, ProviderError> {
        self.verse_calls.fetch_add(1, Ordering::SeqCst);
        self.verses
            .get(&(chapter, verse, edition.to_string()))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("{chapter}:{verse}/{edition}")))
    }

    fn verse_audio(
        &self,
        chapter: u16,
        verse: u32,
        _edition: &str,
    ) -> Result<VerseAudio, ProviderError> {
        self.audio_calls.fetch_add(1, Ordering::SeqCst);
        self.audio
            .get(&(chapter, verse))
            .cloned()
            .ok_or(ProviderError::MissingAudio { chapter, verse })
    }
}
