//! # Verse Data Providers
//!
//! The engine never talks to the network itself. Chapter lists, verse texts
//! and recitation audio come through the [`VerseDataProvider`] trait; a
//! transport hands back the upstream JSON documents and [`wire`] decodes them.
//!
//! Upstream services and the documents they return:
//!
//! - `api.quran.com/api/v4/chapters?language=en`: the 114 chapters
//! - `api.alquran.cloud/v1/ayah/<chapter>:<verse>/<edition>`: one verse in a
//!   text edition (`ar.asad`, `en.asad`, `bn.bengali`) or audio edition
//!   (`ar.alafasy`)
//!
//! [`mirror::MirrorProvider`] serves the same documents from disk.

pub mod mirror;
pub mod wire;

use std::path::PathBuf;
use std::sync::Arc;

pub use mirror::MirrorProvider;

pub const QURAN_COM_API: &str = "https://api.quran.com/api/v4";
pub const ALQURAN_CLOUD_API: &str = "https://api.alquran.cloud/v1";

/// Number of chapters in the Quran.
pub const CHAPTER_COUNT: u16 = 114;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not decode {what}: {source}")]
    Decode {
        what: String,
        source: serde_json::Error,
    },
    #[error("provider answered {code} ({status})")]
    Status { code: u16, status: String },
    #[error("no audio URL for verse {chapter}:{verse}")]
    MissingAudio { chapter: u16, verse: u32 },
    #[error("{0} not found")]
    NotFound(String),
}

/// One of the 114 chapters, as listed by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterInfo {
    pub number: u16,
    /// Canonical English transliteration, e.g. `Al-Baqarah`.
    pub name: String,
}

impl ChapterInfo {
    pub fn new(number: u16, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
        }
    }
}

/// Text of one verse in one edition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseText {
    pub chapter: u16,
    pub verse: u32,
    /// Chapter name as the provider spells it, e.g. `Al-Baqara`.
    pub chapter_name: Option<String>,
    pub text: String,
}

/// Recitation audio of one verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseAudio {
    pub url: String,
    pub fallbacks: Vec<String>,
}

/// Source of chapter metadata, verse texts and recitations.
pub trait VerseDataProvider {
    /// Lists every chapter with its number and canonical name.
    fn chapters(&self) -> Result<Vec<ChapterInfo>, ProviderError>;

    /// Fetches one verse in a text edition.
    fn verse(&self, chapter: u16, verse: u32, edition: &str) -> Result<VerseText, ProviderError>;

    /// Fetches the audio location of one verse in a reciter edition.
    fn verse_audio(
        &self,
        chapter: u16,
        verse: u32,
        edition: &str,
    ) -> Result<VerseAudio, ProviderError>;
}

impl<P: VerseDataProvider + ?Sized> VerseDataProvider for &P {
    fn chapters(&self) -> Result<Vec<ChapterInfo>, ProviderError> {
        (**self).chapters()
    }

    fn verse(&self, chapter: u16, verse: u32, edition: &str) -> Result<VerseText, ProviderError> {
        (**self).verse(chapter, verse, edition)
    }

    fn verse_audio(
        &self,
        chapter: u16,
        verse: u32,
        edition: &str,
    ) -> Result<VerseAudio, ProviderError> {
        (**self).verse_audio(chapter, verse, edition)
    }
}

impl<P: VerseDataProvider + ?Sized> VerseDataProvider for Arc<P> {
    fn chapters(&self) -> Result<Vec<ChapterInfo>, ProviderError> {
        (**self).chapters()
    }

    fn verse(&self, chapter: u16, verse: u32, edition: &str) -> Result<VerseText, ProviderError> {
        (**self).verse(chapter, verse, edition)
    }

    fn verse_audio(
        &self,
        chapter: u16,
        verse: u32,
        edition: &str,
    ) -> Result<VerseAudio, ProviderError> {
        (**self).verse_audio(chapter, verse, edition)
    }
}

/// Upstream URL of the chapter list.
pub fn chapters_url() -> String {
    format!("{QURAN_COM_API}/chapters?language=en")
}

/// Upstream URL of one verse in a text or audio edition.
pub fn verse_url(chapter: u16, verse: u32, edition: &str) -> String {
    format!("{ALQURAN_CLOUD_API}/ayah/{chapter}:{verse}/{edition}")
}
