use crate::domain::{
    AliyahBoundary, Chapter, TaamName, VerseRef,
    search::{TaamSequenceCounts, TaamSequenceResult, count_ngrams},
};

/// The verses of one aliyah that matched a mark sequence, in reading order.
#[derive(Debug, Clone, Default)]
pub struct AliyahTaamSequenceResult {
    idx: usize,
    verse_results: Vec<(VerseRef, TaamSequenceResult)>,
}

impl AliyahTaamSequenceResult {
    /// The index of the aliyah within its parasha (0 to 6).
    #[must_use]
    pub const fn idx(&self) -> usize {
        self.idx
    }

    /// Each matching verse with its matches.
    #[must_use]
    pub fn verse_results(&self) -> &[(VerseRef, TaamSequenceResult)] {
        &self.verse_results
    }

    /// Returns `true` if no verse matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verse_results.is_empty()
    }

    /// The number of matching verses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.verse_results.len()
    }
}

impl<'a> IntoIterator for &'a AliyahTaamSequenceResult {
    type Item = &'a (VerseRef, TaamSequenceResult);
    type IntoIter = std::slice::Iter<'a, (VerseRef, TaamSequenceResult)>;

    fn into_iter(self) -> Self::IntoIter {
        self.verse_results.iter()
    }
}

/// One of the seven readings of a parasha. Its verses may span chapters.
#[derive(Debug, Clone)]
pub struct Aliyah {
    idx: usize,
    verses: Vec<VerseRef>,
}

impl Aliyah {
    /// Creates an aliyah over the given verses.
    #[must_use]
    pub const fn new(idx: usize, verses: Vec<VerseRef>) -> Self {
        Self { idx, verses }
    }

    /// Collects the verses of `chapters` that fall inside `boundary`.
    #[must_use]
    pub fn from_chapters(idx: usize, boundary: &AliyahBoundary, chapters: &[Chapter]) -> Self {
        let verses = chapters
            .iter()
            .skip_while(|chapter| chapter.idx() < boundary.start().chapter)
            .take_while(|chapter| chapter.idx() <= boundary.end().chapter)
            .flat_map(Chapter::verses)
            .filter(|verse| boundary.contains(verse.location()))
            .cloned()
            .collect();
        Self::new(idx, verses)
    }

    /// The index of the aliyah within its parasha (0 to 6).
    #[must_use]
    pub const fn idx(&self) -> usize {
        self.idx
    }

    /// The verses, in reading order.
    #[must_use]
    pub fn verses(&self) -> &[VerseRef] {
        &self.verses
    }

    /// The number of verses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// Returns `true` if the aliyah has no verses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Returns `true` if any verse carries the mark.
    #[must_use]
    pub fn has_taam(&self, name: TaamName) -> bool {
        self.verses.iter().any(|verse| verse.has_taam(name))
    }

    /// The number of words carrying the mark.
    #[must_use]
    pub fn count_taam(&self, name: TaamName) -> usize {
        self.verses.iter().map(|verse| verse.count_taam(name)).sum()
    }

    /// Searches every verse, keeping those with at least one match.
    #[must_use]
    pub fn find_verses_with_taam_sequence(
        &self,
        sequence: &[TaamName],
        include_servants: bool,
    ) -> AliyahTaamSequenceResult {
        let verse_results = self
            .verses
            .iter()
            .filter_map(|verse| {
                let result = verse.find_taam_sequence(sequence, include_servants);
                (!result.is_empty()).then(|| (verse.clone(), result))
            })
            .collect();
        AliyahTaamSequenceResult {
            idx: self.idx,
            verse_results,
        }
    }

    /// Counts the runs of `n` marks, verse by verse.
    ///
    /// Runs never cross a verse boundary.
    #[must_use]
    pub fn count_n_taam_sequences(&self, n: usize, include_servants: bool) -> TaamSequenceCounts {
        let mut counts = TaamSequenceCounts::new();
        for verse in &self.verses {
            count_ngrams(&verse.taam_names(include_servants), n, &mut counts);
        }
        counts
    }
}
