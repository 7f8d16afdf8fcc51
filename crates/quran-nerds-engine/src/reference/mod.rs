//! # Verse References
//!
//! Resolves human-readable references such as `Al-Baqara 1-4` or
//! `Surah Yasin 12` into a chapter number and verse range.
//!
//! ## Modules
//!
//! - **`parse`**: reference syntax (name, verse, optional range end)
//! - **`names`**: chapter name normalization shared by index and lookup
//! - **`chapters`**: `ChapterIndex` and the single-flight `ChapterIndexCache`
//! - **`resolver`**: `VerseReferenceResolver` and `ResolvedReference`
//!
//! ## Key Invariants
//!
//! - The provider's chapter list is fetched at most once per successful load;
//!   concurrent callers share the fetch in flight
//! - A failed fetch is never cached
//! - Resolution never errors: anything unresolvable is `None`
//! - Verse numbers are not checked against chapter lengths

pub mod chapters;
pub mod names;
pub mod parse;
pub mod resolver;

pub use chapters::{ChapterIndex, ChapterIndexCache, DEFAULT_FETCH_TIMEOUT};
pub use parse::{ParsedReference, parse_reference};
pub use resolver::{ResolvedReference, VerseReferenceResolver, resolve_with};
