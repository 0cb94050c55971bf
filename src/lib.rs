//! Cantillation-mark annotation for Biblical Hebrew text
//!
//! Books are plain-text files of verse lines. Each verse is annotated letter
//! by letter, its marks are disambiguated, and the result can be searched for
//! runs of marks across the weekly reading portions.

pub mod domain;
pub use domain::{Book, Config, Taam, TaamName, Verse, Word};

/// Loading book text and boundary metadata.
pub mod storage;
pub use storage::{LoadError, MetadataSource};
