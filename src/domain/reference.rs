//! Chapter:verse references and the reading-portion boundaries built from them.

use std::{fmt, str::FromStr, sync::LazyLock};

use non_empty_string::NonEmptyString;
use regex::Regex;

static CHAPTER_VERSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+):(\d+)$").expect("chapter:verse pattern is valid")
});

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+):(\d+)-(?:(\d+):)?(\d+)$").expect("range pattern is valid")
});

/// A position in a book, by chapter and verse number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChapterVerse {
    /// The chapter number.
    pub chapter: usize,
    /// The verse number within the chapter.
    pub verse: usize,
}

impl ChapterVerse {
    /// Creates a reference.
    #[must_use]
    pub const fn new(chapter: usize, verse: usize) -> Self {
        Self { chapter, verse }
    }
}

impl fmt::Display for ChapterVerse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

impl FromStr for ChapterVerse {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = CHAPTER_VERSE
            .captures(s.trim())
            .ok_or_else(|| ParseError::ChapterVerse(s.to_string()))?;
        let number = |i: usize| {
            captures[i]
                .parse::<usize>()
                .map_err(|_| ParseError::ChapterVerse(s.to_string()))
        };
        Ok(Self::new(number(1)?, number(2)?))
    }
}

/// Error parsing a reference or an aliyah range.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// Not of the form `chapter:verse`.
    #[error("Invalid chapter:verse reference '{0}'")]
    ChapterVerse(String),

    /// Not of the form `<Book> c:v-[c:]v`.
    #[error("Invalid aliyah range '{0}'")]
    Range(String),

    /// The range ends before it starts.
    #[error("Aliyah range '{0}' ends before it starts")]
    Reversed(String),
}

/// The inclusive range of verses read in one aliyah.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliyahBoundary {
    start: ChapterVerse,
    end: ChapterVerse,
}

impl AliyahBoundary {
    /// Creates a boundary from its first and last verse.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Reversed`] if `end` comes before `start`.
    pub fn new(start: ChapterVerse, end: ChapterVerse) -> Result<Self, ParseError> {
        if end < start {
            return Err(ParseError::Reversed(format!("{start}-{end}")));
        }
        Ok(Self { start, end })
    }

    /// The first verse of the aliyah.
    #[must_use]
    pub const fn start(&self) -> ChapterVerse {
        self.start
    }

    /// The last verse of the aliyah.
    #[must_use]
    pub const fn end(&self) -> ChapterVerse {
        self.end
    }

    /// Returns `true` if the verse falls inside the range.
    #[must_use]
    pub fn contains(&self, position: ChapterVerse) -> bool {
        self.start <= position && position <= self.end
    }
}

impl fmt::Display for AliyahBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.chapter == self.end.chapter {
            write!(f, "{}-{}", self.start, self.end.verse)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for AliyahBoundary {
    type Err = ParseError;

    /// Parses `"<Book> <c>:<v>-[<c>:]<v>"`.
    ///
    /// The book name may contain spaces; the range is the last token. An
    /// en-dash is accepted in place of the hyphen. When the end has no
    /// chapter it is in the start chapter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let range = s
            .split_whitespace()
            .last()
            .ok_or_else(|| ParseError::Range(s.to_string()))?
            .replace('\u{2013}', "-");
        let captures = RANGE
            .captures(&range)
            .ok_or_else(|| ParseError::Range(s.to_string()))?;
        let number = |i: usize| {
            captures[i]
                .parse::<usize>()
                .map_err(|_| ParseError::Range(s.to_string()))
        };

        let start = ChapterVerse::new(number(1)?, number(2)?);
        let end_chapter = match captures.get(3) {
            Some(_) => number(3)?,
            None => start.chapter,
        };
        let end = ChapterVerse::new(end_chapter, number(4)?);
        Self::new(start, end)
    }
}

/// A parasha's name and the boundaries of its aliyot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParashaBoundary {
    name: NonEmptyString,
    aliyot: Vec<AliyahBoundary>,
}

impl ParashaBoundary {
    /// Creates the boundary metadata of one parasha.
    #[must_use]
    pub const fn new(name: NonEmptyString, aliyot: Vec<AliyahBoundary>) -> Self {
        Self { name, aliyot }
    }

    /// The parasha's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The aliyah boundaries, in reading order.
    #[must_use]
    pub fn aliyot(&self) -> &[AliyahBoundary] {
        &self.aliyot
    }

    /// The first verse of the parasha.
    #[must_use]
    pub fn start(&self) -> Option<ChapterVerse> {
        self.aliyot.first().map(AliyahBoundary::start)
    }

    /// The last verse of the parasha.
    #[must_use]
    pub fn end(&self) -> Option<ChapterVerse> {
        self.aliyot.last().map(AliyahBoundary::end)
    }
}

/// The reading-portion structure of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    name: NonEmptyString,
    parshiot: Vec<ParashaBoundary>,
}

impl BookMetadata {
    /// Creates book metadata.
    #[must_use]
    pub const fn new(name: NonEmptyString, parshiot: Vec<ParashaBoundary>) -> Self {
        Self { name, parshiot }
    }

    /// The book's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The parshiot, in reading order.
    #[must_use]
    pub fn parshiot(&self) -> &[ParashaBoundary] {
        &self.parshiot
    }
}
