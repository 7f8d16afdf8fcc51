//! Decoding of upstream JSON documents.

use serde::Deserialize;
use serde_json::Value;

use super::{CHAPTER_COUNT, ChapterInfo, ProviderError, VerseAudio, VerseText};

#[derive(Deserialize)]
struct ChapterList {
    chapters: Vec<WireChapter>,
}

#[derive(Deserialize)]
struct WireChapter {
    id: u16,
    name_simple: String,
}

/// alquran.cloud wraps every answer in `{code, status, data}`; on failure
/// `data` is a message string rather than an object.
#[derive(Deserialize)]
struct Envelope {
    code: u16,
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Deserialize)]
struct AyahData {
    text: String,
    #[serde(rename = "numberInSurah")]
    number_in_surah: Option<u32>,
    surah: Option<SurahData>,
}

#[derive(Deserialize)]
struct SurahData {
    number: u16,
    #[serde(rename = "englishName")]
    english_name: Option<String>,
}

#[derive(Deserialize)]
struct AudioData {
    audio: Option<String>,
    #[serde(rename = "audioSecondary", default)]
    audio_secondary: Vec<String>,
}

fn decode_error(what: &str) -> impl FnOnce(serde_json::Error) -> ProviderError + '_ {
    move |source| ProviderError::Decode {
        what: what.to_string(),
        source,
    }
}

/// Decodes a quran.com chapter list.
///
/// Entries outside 1..=114 are dropped.
pub fn decode_chapters(body: &str) -> Result<Vec<ChapterInfo>, ProviderError> {
    let list: ChapterList = serde_json::from_str(body).map_err(decode_error("chapter list"))?;
    Ok(list
        .chapters
        .into_iter()
        .filter(|c| {
            let valid = (1..=CHAPTER_COUNT).contains(&c.id);
            if !valid {
                log::warn!("ignoring chapter with id {} ({})", c.id, c.name_simple);
            }
            valid
        })
        .map(|c| ChapterInfo::new(c.id, c.name_simple))
        .collect())
}

fn open_envelope(body: &str, what: &str) -> Result<Value, ProviderError> {
    let envelope: Envelope = serde_json::from_str(body).map_err(decode_error(what))?;
    match envelope.data {
        Some(data) if envelope.code == 200 => Ok(data),
        _ => Err(ProviderError::Status {
            code: envelope.code,
            status: envelope.status,
        }),
    }
}

/// Decodes an alquran.cloud text-edition verse.
pub fn decode_verse(body: &str, chapter: u16, verse: u32) -> Result<VerseText, ProviderError> {
    let what = format!("verse {chapter}:{verse}");
    let data: AyahData =
        serde_json::from_value(open_envelope(body, &what)?).map_err(decode_error(&what))?;

    Ok(VerseText {
        chapter: data.surah.as_ref().map_or(chapter, |s| s.number),
        verse: data.number_in_surah.unwrap_or(verse),
        chapter_name: data.surah.and_then(|s| s.english_name),
        text: data.text,
    })
}

/// Decodes an alquran.cloud audio-edition verse.
///
/// The primary `audio` URL wins; otherwise the first secondary URL is used.
pub fn decode_audio(body: &str, chapter: u16, verse: u32) -> Result<VerseAudio, ProviderError> {
    let what = format!("audio {chapter}:{verse}");
    let data: AudioData =
        serde_json::from_value(open_envelope(body, &what)?).map_err(decode_error(&what))?;

    let mut candidates = data
        .audio
        .into_iter()
        .chain(data.audio_secondary)
        .filter(|url| !url.is_empty());
    let url = candidates
        .next()
        .ok_or(ProviderError::MissingAudio { chapter, verse })?;

    Ok(VerseAudio {
        url,
        fallbacks: candidates.collect(),
    })
}
