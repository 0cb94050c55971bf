use std::{collections::BTreeMap, fmt};

use non_empty_string::NonEmptyString;
use rayon::prelude::*;

use crate::domain::{
    BookMetadata, Chapter, ChapterVerse, Error, Letter, Niqud, Parasha, ParashaTaamSequenceResult,
    Taam, TaamName, VerseRef, Word,
    search::{TaamSequenceCounts, count_ngrams, merge_counts},
};

/// A book: its chapters, and the parshiot that partition them.
///
/// A book is built once and never mutated. The flat verse list is computed
/// at construction.
#[derive(Debug, Clone)]
pub struct Book {
    name: NonEmptyString,
    chapters: Vec<Chapter>,
    parshiot: Vec<Parasha>,
    verses: Vec<VerseRef>,
}

impl Book {
    /// Builds a book and partitions it with the reading-portion metadata.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralInvariant`] if a parasha in the metadata
    /// does not have exactly seven aliyot.
    pub fn new(
        name: NonEmptyString,
        chapters: Vec<Chapter>,
        metadata: &BookMetadata,
    ) -> Result<Self, Error> {
        if !metadata.name().eq_ignore_ascii_case(name.as_str()) {
            tracing::debug!(book = %name, metadata = metadata.name(), "metadata name differs from book name");
        }

        let parshiot = metadata
            .parshiot()
            .iter()
            .map(|boundary| Parasha::from_chapters(boundary, &chapters))
            .collect::<Result<Vec<_>, _>>()?;
        let verses: Vec<VerseRef> = chapters
            .iter()
            .flat_map(Chapter::verses)
            .cloned()
            .collect();

        tracing::info!(
            book = %name,
            chapters = chapters.len(),
            verses = verses.len(),
            parshiot = parshiot.len(),
            "built book"
        );

        Ok(Self {
            name,
            chapters,
            parshiot,
            verses,
        })
    }

    /// The book's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The chapters, in order.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// The parshiot, in reading order.
    #[must_use]
    pub fn parshiot(&self) -> &[Parasha] {
        &self.parshiot
    }

    /// The parasha with the given name, ignoring ASCII case.
    #[must_use]
    pub fn parasha(&self, name: &str) -> Option<&Parasha> {
        self.parshiot
            .iter()
            .find(|parasha| parasha.name().eq_ignore_ascii_case(name))
    }

    /// Every verse of the book, in order.
    #[must_use]
    pub fn verses(&self) -> &[VerseRef] {
        &self.verses
    }

    /// Looks up a verse by chapter and verse number.
    #[must_use]
    pub fn verse(&self, position: ChapterVerse) -> Option<&VerseRef> {
        self.chapters
            .iter()
            .find(|chapter| chapter.idx() == position.chapter)?
            .verse(position.verse)
    }

    /// Every word, in order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.verses.iter().flat_map(|verse| verse.words())
    }

    /// Every letter, in order.
    pub fn letters(&self) -> impl Iterator<Item = &Letter> {
        self.words().flat_map(Word::letters)
    }

    /// Every disambiguated mark, in order.
    pub fn taamim(&self) -> impl Iterator<Item = &Taam> {
        self.words().flat_map(Word::taamim)
    }

    /// Every disambiguated mark except servant marks, in order.
    pub fn taamim_without_meshartim(&self) -> impl Iterator<Item = &Taam> {
        self.words().flat_map(Word::taamim_without_meshartim)
    }

    /// Every vowel, in order.
    pub fn nequdot(&self) -> impl Iterator<Item = &Niqud> {
        self.letters().flat_map(Letter::nequdot)
    }

    /// Returns `true` if any verse carries the mark.
    #[must_use]
    pub fn has_taam(&self, name: TaamName) -> bool {
        self.verses.iter().any(|verse| verse.has_taam(name))
    }

    /// The number of words carrying the mark.
    #[must_use]
    pub fn count_taam(&self, name: TaamName) -> usize {
        self.chapters.iter().map(|chapter| chapter.count_taam(name)).sum()
    }

    /// The verses carrying the mark.
    #[must_use]
    pub fn find_verses_with_taam(&self, name: TaamName) -> Vec<VerseRef> {
        self.verses
            .iter()
            .filter(|verse| verse.has_taam(name))
            .cloned()
            .collect()
    }

    /// The words carrying the mark, with their verse and position in it.
    pub fn find_words_with_taam(
        &self,
        name: TaamName,
    ) -> impl Iterator<Item = (&VerseRef, usize, &Word)> {
        self.verses.iter().flat_map(move |verse| {
            verse
                .words()
                .enumerate()
                .filter(move |(_, word)| word.has_taam(name))
                .map(move |(i, word)| (verse, i, word))
        })
    }

    /// Searches every parasha, grouping the matches by parasha and aliyah.
    ///
    /// Parshiot without any match are left out.
    #[must_use]
    pub fn find_verses_with_taam_sequence(
        &self,
        sequence: &[TaamName],
        include_servants: bool,
    ) -> BookTaamSequenceResult {
        let parshiot = self
            .parshiot
            .iter()
            .map(|parasha| {
                (
                    parasha.name().to_string(),
                    parasha.find_verses_with_taam_sequence(sequence, include_servants),
                )
            })
            .filter(|(_, result)| !result.is_empty())
            .collect();
        BookTaamSequenceResult { parshiot }
    }

    /// Counts the runs of `n` marks in every verse of the book.
    ///
    /// Verses are counted in parallel.
    #[must_use]
    pub fn count_n_taam_sequences(&self, n: usize, include_servants: bool) -> TaamSequenceCounts {
        self.verses
            .par_iter()
            .fold(TaamSequenceCounts::new, |mut counts, verse| {
                count_ngrams(&verse.taam_names(include_servants), n, &mut counts);
                counts
            })
            .reduce(TaamSequenceCounts::new, merge_counts)
    }

    /// The number of occurrences of each mark.
    #[must_use]
    pub fn taam_frequencies(&self, include_servants: bool) -> BTreeMap<TaamName, usize> {
        self.verses
            .par_iter()
            .fold(BTreeMap::new, |mut counts, verse| {
                for name in verse.taam_names(include_servants) {
                    *counts.entry(name).or_insert(0) += 1;
                }
                counts
            })
            .reduce(BTreeMap::new, |mut into, other| {
                for (name, count) in other {
                    *into.entry(name).or_insert(0) += count;
                }
                into
            })
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chapter in &self.chapters {
            writeln!(f, "Chapter {}", chapter.idx())?;
            writeln!(f, "{chapter}")?;
        }
        Ok(())
    }
}

/// Search results of a book, keyed by parasha name in reading order.
#[derive(Debug, Clone, Default)]
pub struct BookTaamSequenceResult {
    parshiot: Vec<(String, ParashaTaamSequenceResult)>,
}

impl BookTaamSequenceResult {
    /// The parshiot with at least one match, in reading order.
    #[must_use]
    pub fn parshiot(&self) -> &[(String, ParashaTaamSequenceResult)] {
        &self.parshiot
    }

    /// The result for the named parasha, if it matched.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParashaTaamSequenceResult> {
        self.parshiot
            .iter()
            .find(|(parasha, _)| parasha == name)
            .map(|(_, result)| result)
    }

    /// Returns `true` if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parshiot.is_empty()
    }

    /// The number of matching verses.
    #[must_use]
    pub fn verse_count(&self) -> usize {
        self.parshiot
            .iter()
            .map(|(_, result)| result.verse_count())
            .sum()
    }
}
