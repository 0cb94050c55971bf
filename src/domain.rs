//! Domain models for annotated Hebrew text.
//!
//! This module contains the symbol tables, the letter/word/verse hierarchy
//! with its disambiguation rules, the chapter and book aggregates, and the
//! parasha/aliyah partition built from boundary metadata.

/// Code point tables and mark classification.
pub mod symbols;
pub use symbols::{InvalidSymbolError, MESHARTIM, NiqudName, TaamName};

mod taam;
pub use taam::Taam;

mod niqud;
pub use niqud::Niqud;

mod letter;
pub use letter::{Letter, NotALetterError};

mod word;
pub use word::{ParagraphMarker, Word};

mod search;
pub use search::{TaamSequenceCounts, TaamSequenceResult};

mod verse;
pub use verse::Verse;

mod chapter;
pub use chapter::{Chapter, VerseRef};

/// Chapter:verse references and reading-portion boundaries.
pub mod reference;
pub use reference::{AliyahBoundary, BookMetadata, ChapterVerse, ParashaBoundary};

mod aliyah;
pub use aliyah::{Aliyah, AliyahTaamSequenceResult};

mod parasha;
pub use parasha::{ALIYOT_PER_PARASHA, Parasha, ParashaTaamSequenceResult};

mod book;
pub use book::{Book, BookTaamSequenceResult};

mod config;
pub use config::Config;

/// Errors raised while building the document model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mark or vowel could not be resolved.
    #[error(transparent)]
    InvalidSymbol(#[from] InvalidSymbolError),

    /// The input text does not have the expected shape.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A structural rule of the hierarchy was broken.
    #[error("Structural invariant violated: {0}")]
    StructuralInvariant(String),
}
