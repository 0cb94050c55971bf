use std::{fmt, ops::Deref, sync::Arc};

use crate::domain::{ChapterVerse, TaamName, Verse};

/// A shared handle to a verse that remembers its chapter.
///
/// Chapters own their verses through these handles; aliyot hold clones of
/// the same handles, so a verse is never copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRef {
    chapter: usize,
    verse: Arc<Verse>,
}

impl VerseRef {
    /// Wraps a verse of the given chapter.
    #[must_use]
    pub fn new(chapter: usize, verse: Verse) -> Self {
        Self {
            chapter,
            verse: Arc::new(verse),
        }
    }

    /// The chapter number.
    #[must_use]
    pub const fn chapter(&self) -> usize {
        self.chapter
    }

    /// The chapter and verse number.
    #[must_use]
    pub fn location(&self) -> ChapterVerse {
        ChapterVerse::new(self.chapter, self.verse.idx())
    }

    /// Returns `true` if both handles point at the same verse.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.verse, &other.verse)
    }
}

impl Deref for VerseRef {
    type Target = Verse;

    fn deref(&self) -> &Self::Target {
        &self.verse
    }
}

/// A chapter: an ordered, growable sequence of verses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    idx: usize,
    verses: Vec<VerseRef>,
}

impl Chapter {
    /// Creates an empty chapter.
    #[must_use]
    pub const fn new(idx: usize) -> Self {
        Self {
            idx,
            verses: Vec::new(),
        }
    }

    /// The chapter number.
    #[must_use]
    pub const fn idx(&self) -> usize {
        self.idx
    }

    /// Appends a verse.
    pub fn add_verse(&mut self, verse: Verse) {
        self.verses.push(VerseRef::new(self.idx, verse));
    }

    /// The verses, in order.
    #[must_use]
    pub fn verses(&self) -> &[VerseRef] {
        &self.verses
    }

    /// The verse numbered `idx`.
    #[must_use]
    pub fn verse(&self, idx: usize) -> Option<&VerseRef> {
        self.verses.iter().find(|verse| verse.idx() == idx)
    }

    /// The number of verses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// Returns `true` if no verse has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Returns `true` if any verse carries the mark.
    #[must_use]
    pub fn has_taam(&self, name: TaamName) -> bool {
        self.verses.iter().any(|verse| verse.has_taam(name))
    }

    /// The number of words carrying the mark, across all verses.
    #[must_use]
    pub fn count_taam(&self, name: TaamName) -> usize {
        self.verses.iter().map(|verse| verse.count_taam(name)).sum()
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, verse) in self.verses.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}:{} {}", self.idx, verse.idx(), **verse)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter() -> Chapter {
        let mut chapter = Chapter::new(1);
        chapter.add_verse(
            Verse::parse(1, "בְּרֵאשִׁ֖ית בָּרָ֣א אֱלֹהִ֑ים אֵ֥ת הַשָּׁמַ֖יִם וְאֵ֥ת הָאָֽרֶץ׃").unwrap(),
        );
        chapter.add_verse(Verse::parse(3, "וַיֹּ֥אמֶר אֱלֹהִ֖ים יְהִ֣י א֑וֹר וַֽיְהִי־אֽוֹר׃").unwrap());
        chapter
    }

    #[test]
    fn verses_are_appended_in_order() {
        let chapter = chapter();
        assert_eq!(chapter.len(), 2);
        assert_eq!(chapter.verses()[1].idx(), 3);
        assert_eq!(chapter.verses()[1].location(), ChapterVerse::new(1, 3));
    }

    #[test]
    fn verse_lookup_uses_verse_number() {
        let chapter = chapter();
        assert!(chapter.verse(3).is_some());
        assert!(chapter.verse(2).is_none());
    }

    #[test]
    fn taam_queries_aggregate_verses() {
        let chapter = chapter();
        assert!(chapter.has_taam(TaamName::Atnah));
        assert!(!chapter.has_taam(TaamName::Segolta));
        assert_eq!(chapter.count_taam(TaamName::Tarha), 3);
        assert_eq!(chapter.count_taam(TaamName::Atnah), 2);
    }

    #[test]
    fn clones_share_verses() {
        let chapter = chapter();
        let copy = chapter.verses()[0].clone();
        assert!(copy.ptr_eq(&chapter.verses()[0]));
    }

    #[test]
    fn display_prefixes_references() {
        let rendered = chapter().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1:1 "));
        assert!(lines[1].starts_with("1:3 "));
    }
}
