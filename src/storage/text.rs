//! Ingestion of line-oriented book text.
//!
//! Each line of a book file falls into one of four classes:
//! - a verse line starts with a right-to-left embedding mark and reads
//!   `<verse> <label> <words...>`;
//! - a chapter header contains `Chapter`, with the chapter number as its
//!   third token;
//! - the book header contains `chapters` and `verses` but not `End of`, with
//!   the book name as its second token;
//! - anything else is ignored.

use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};

use non_empty_string::NonEmptyString;
use tracing::instrument;
use walkdir::WalkDir;

use crate::{
    domain::{self, Book, Chapter, Verse, symbols::{LRE, PDF, RLE}},
    storage::metadata::{FetchError, MetadataSource},
};

/// Errors raised while loading a book.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The book file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// A header or verse line is missing an expected token.
    #[error("line {line}: {reason}")]
    Malformed {
        /// The 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A verse line could not be assembled.
    #[error("line {line}: {source}")]
    Verse {
        /// The 1-based line number.
        line: usize,
        /// The underlying error.
        source: domain::Error,
    },

    /// The parsed hierarchy is inconsistent with its metadata.
    #[error(transparent)]
    Structure(domain::Error),

    /// The book's metadata could not be obtained.
    #[error("failed to load metadata: {0}")]
    Metadata(#[from] FetchError),
}

/// The class of a line of book text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A verse.
    Verse,
    /// A chapter header.
    Chapter,
    /// The book header.
    Book,
    /// Anything else.
    Other,
}

impl LineKind {
    /// Classifies a line. Verse lines take precedence over chapter headers,
    /// which take precedence over the book header.
    #[must_use]
    pub fn of(line: &str) -> Self {
        if line.starts_with(RLE) {
            Self::Verse
        } else if line.contains("Chapter") {
            Self::Chapter
        } else if line.contains("chapters") && line.contains("verses") && !line.contains("End of") {
            Self::Book
        } else {
            Self::Other
        }
    }
}

fn token(line: &str, index: usize, number: usize, what: &str) -> Result<String, LoadError> {
    line.split_whitespace()
        .nth(index)
        .map(|token| token.trim_matches([LRE, RLE, PDF]).to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| LoadError::Malformed {
            line: number,
            reason: format!("{what} line has no token {}", index + 1),
        })
}

fn index(line: &str, position: usize, number: usize, what: &str) -> Result<usize, LoadError> {
    let token = token(line, position, number, what)?;
    token.parse().map_err(|_| LoadError::Malformed {
        line: number,
        reason: format!("{what} number '{token}' is not a number"),
    })
}

/// Parses book text into chapters.
///
/// Returns the book name from the header and the chapters in order.
///
/// # Errors
///
/// Returns [`LoadError::Malformed`] if a header or verse line is missing its
/// number or name, if a verse appears before the first chapter, or if there
/// is no book header, and [`LoadError::Verse`] if a verse cannot be
/// assembled.
pub fn parse_chapters(text: &str) -> Result<(NonEmptyString, Vec<Chapter>), LoadError> {
    let mut name = None;
    let mut chapters: Vec<Chapter> = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let number = i + 1;
        match LineKind::of(line) {
            LineKind::Verse => {
                let idx = index(line, 1, number, "verse")?;
                let verse =
                    Verse::parse(idx, line).map_err(|source| LoadError::Verse { line: number, source })?;
                let chapter = chapters.last_mut().ok_or_else(|| LoadError::Malformed {
                    line: number,
                    reason: "verse before the first chapter header".to_string(),
                })?;
                chapter.add_verse(verse);
            }
            LineKind::Chapter => {
                let idx = index(line, 2, number, "chapter")?;
                tracing::trace!("Chapter {idx} starts at line {number}");
                chapters.push(Chapter::new(idx));
            }
            LineKind::Book => {
                let token = token(line, 1, number, "book")?;
                tracing::debug!("Book header '{token}' at line {number}");
                name = NonEmptyString::new(token).ok();
            }
            LineKind::Other => tracing::trace!("Ignoring line {number}"),
        }
    }

    let name = name.ok_or_else(|| LoadError::Malformed {
        line: 0,
        reason: "no book header".to_string(),
    })?;
    Ok((name, chapters))
}

/// Parses book text and partitions it with metadata from `source`.
///
/// # Errors
///
/// Returns a [`LoadError`] if the text is malformed, the metadata cannot be
/// obtained, or the metadata does not describe seven aliyot per parasha.
#[instrument(skip(text, source))]
pub fn parse_book(text: &str, source: &dyn MetadataSource) -> Result<Book, LoadError> {
    let (name, chapters) = parse_chapters(text)?;
    let metadata = source.book_metadata(name.as_str())?;
    Book::new(name, chapters, &metadata).map_err(LoadError::Structure)
}

/// Reads a book file and parses it with [`parse_book`].
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, or any error of
/// [`parse_book`].
#[instrument(skip(source))]
pub fn load_book(path: &Path, source: &dyn MetadataSource) -> Result<Book, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_book(&text, source)
}

/// The path of a book's text file under `root`: `<root>/<name>.txt`, with
/// the name lowercased.
#[must_use]
pub fn book_path(root: &Path, name: &str) -> PathBuf {
    root.join(format!("{}.txt", name.to_lowercase()))
}

/// The book text files directly under `root`, sorted by path.
#[must_use]
pub fn book_files(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new("txt")))
        .map(walkdir::DirEntry::into_path)
        .collect();
    paths.sort();
    paths
}
