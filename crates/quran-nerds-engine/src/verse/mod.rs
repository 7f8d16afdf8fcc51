//! # Verse Citations
//!
//! Detects Quranic verse citations typed or pasted into a note and rewrites
//! them into a canonical verse block.
//!
//! A citation is a short run of top-level blocks:
//!
//! ```text
//! <p>Al-Baqara 255</p>                       reference line
//! <p>ٱللَّهُ لَآ إِلَٰهَ إِلَّا هُوَ ...</p>          Arabic text
//! <p><strong>English:</strong> Allah ...</p>  English translation (labelled)
//! <p><strong>বাংলা:</strong> আল্লাহ ...</p>    Bangla translation (label optional)
//! ```
//!
//! ## Modules
//!
//! - **`classify`**: text-only facts about a block (reference, Arabic, labels)
//! - **`citation`**: the open citation accumulated during a pass
//! - **`block`**: `VerseBlock`, the stored output shape, and reading it back
//! - **`normalize`**: `VerseNormalizer`, the single forward pass
//!
//! ## Key Invariants
//!
//! - Verse blocks from earlier passes are never re-scanned, so normalizing
//!   twice gives the same markup as normalizing once
//! - Blocks that are not part of a finalized citation come out unchanged and
//!   in their original order
//! - A citation without Arabic text is never emitted
//! - English is recognised only with its label; Bangla also by script

pub mod block;
pub mod citation;
pub mod classify;
pub mod normalize;

pub use block::{VerseBlock, verse_references};
pub use classify::{LineClass, VerseLineClassifier};
pub use normalize::{Normalization, VerseNormalizer, normalize_blocks, normalize_markup};
