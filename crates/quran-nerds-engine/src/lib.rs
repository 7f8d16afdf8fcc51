pub mod compose;
pub mod io;
pub mod markup;
pub mod playback;
pub mod provider;
pub mod reference;
pub mod script;
pub mod verse;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use compose::{ComposeError, Editions, VerseComposer, VerseSelection};
pub use io::*;
pub use markup::{Block, BlockKind, MarkupError, excerpt, parse_blocks, plain_text, serialize_blocks};
pub use playback::{PlaybackEntry, PlaybackQueue};
pub use provider::{
    ChapterInfo, MirrorProvider, ProviderError, VerseAudio, VerseDataProvider, VerseText,
};
pub use reference::{
    ChapterIndex, ChapterIndexCache, ResolvedReference, VerseReferenceResolver, resolve_with,
};
pub use verse::{Normalization, VerseBlock, VerseNormalizer, normalize_markup, verse_references};
