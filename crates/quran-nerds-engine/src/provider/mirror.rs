use std::fs;
use std::path::{Path, PathBuf};

use super::{ChapterInfo, ProviderError, VerseAudio, VerseDataProvider, VerseText, wire};

/// Serves upstream documents saved on disk.
///
/// Layout under the root directory:
///
/// ```text
/// chapters.json                         quran.com chapter list
/// ayah/<chapter>/<verse>/<edition>.json alquran.cloud verse envelope
/// ```
///
/// Text and audio editions share the `ayah` tree, as they share the upstream
/// endpoint.
#[derive(Debug, Clone)]
pub struct MirrorProvider {
    root: PathBuf,
}

impl MirrorProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn chapters_path(&self) -> PathBuf {
        self.root.join("chapters.json")
    }

    pub fn verse_path(&self, chapter: u16, verse: u32, edition: &str) -> PathBuf {
        self.root
            .join("ayah")
            .join(chapter.to_string())
            .join(verse.to_string())
            .join(format!("{edition}.json"))
    }

    fn read(&self, path: &Path) -> Result<String, ProviderError> {
        if !path.exists() {
            return Err(ProviderError::NotFound(path.display().to_string()));
        }
        fs::read_to_string(path).map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl VerseDataProvider for MirrorProvider {
    fn chapters(&self) -> Result<Vec<ChapterInfo>, ProviderError> {
        let body = self.read(&self.chapters_path())?;
        wire::decode_chapters(&body)
    }

    fn verse(&self, chapter: u16, verse: u32, edition: &str) -> Result<VerseText, ProviderError> {
        let body = self.read(&self.verse_path(chapter, verse, edition))?;
        wire::decode_verse(&body, chapter, verse)
    }

    fn verse_audio(
        &self,
        chapter: u16,
        verse: u32,
        edition: &str,
    ) -> Result<VerseAudio, ProviderError> {
        let body = self.read(&self.verse_path(chapter, verse, edition))?;
        wire::decode_audio(&body, chapter, verse)
    }
}
