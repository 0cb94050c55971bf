use non_empty_string::NonEmptyString;

use crate::domain::{
    Aliyah, AliyahTaamSequenceResult, Chapter, Error, ParashaBoundary, TaamName,
    search::{TaamSequenceCounts, merge_counts},
};

/// The number of aliyot in every parasha.
pub const ALIYOT_PER_PARASHA: usize = 7;

/// A weekly reading portion, made of exactly seven aliyot.
#[derive(Debug, Clone)]
pub struct Parasha {
    name: NonEmptyString,
    aliyot: [Aliyah; ALIYOT_PER_PARASHA],
}

impl Parasha {
    /// Creates a parasha from its aliyot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralInvariant`] unless there are exactly seven
    /// aliyot.
    pub fn new(name: NonEmptyString, aliyot: Vec<Aliyah>) -> Result<Self, Error> {
        let count = aliyot.len();
        let aliyot = <[Aliyah; ALIYOT_PER_PARASHA]>::try_from(aliyot).map_err(|_| {
            Error::StructuralInvariant(format!(
                "parasha {name} has {count} aliyot, expected {ALIYOT_PER_PARASHA}"
            ))
        })?;
        Ok(Self { name, aliyot })
    }

    /// Partitions `chapters` into the aliyot described by `boundary`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralInvariant`] unless the boundary lists
    /// exactly seven aliyot.
    pub fn from_chapters(boundary: &ParashaBoundary, chapters: &[Chapter]) -> Result<Self, Error> {
        let aliyot = boundary
            .aliyot()
            .iter()
            .enumerate()
            .map(|(idx, aliyah)| Aliyah::from_chapters(idx, aliyah, chapters))
            .collect();
        let name = NonEmptyString::new(boundary.name().to_string())
            .map_err(|_| Error::StructuralInvariant("parasha without a name".to_string()))?;
        Self::new(name, aliyot)
    }

    /// The parasha's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The aliyot, in reading order.
    #[must_use]
    pub const fn aliyot(&self) -> &[Aliyah; ALIYOT_PER_PARASHA] {
        &self.aliyot
    }

    /// The total number of verses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliyot.iter().map(Aliyah::len).sum()
    }

    /// Returns `true` if no aliyah has any verse.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliyot.iter().all(Aliyah::is_empty)
    }

    /// Returns `true` if any aliyah carries the mark.
    #[must_use]
    pub fn has_taam(&self, name: TaamName) -> bool {
        self.aliyot.iter().any(|aliyah| aliyah.has_taam(name))
    }

    /// The number of words carrying the mark.
    #[must_use]
    pub fn count_taam(&self, name: TaamName) -> usize {
        self.aliyot.iter().map(|aliyah| aliyah.count_taam(name)).sum()
    }

    /// Searches every aliyah.
    #[must_use]
    pub fn find_verses_with_taam_sequence(
        &self,
        sequence: &[TaamName],
        include_servants: bool,
    ) -> ParashaTaamSequenceResult {
        let aliyah_results = self
            .aliyot
            .each_ref()
            .map(|aliyah| aliyah.find_verses_with_taam_sequence(sequence, include_servants));
        ParashaTaamSequenceResult { aliyah_results }
    }

    /// Counts the runs of `n` marks across all aliyot.
    #[must_use]
    pub fn count_n_taam_sequences(&self, n: usize, include_servants: bool) -> TaamSequenceCounts {
        self.aliyot
            .iter()
            .map(|aliyah| aliyah.count_n_taam_sequences(n, include_servants))
            .fold(TaamSequenceCounts::new(), merge_counts)
    }
}

/// The search results of a parasha, one entry per aliyah.
#[derive(Debug, Clone)]
pub struct ParashaTaamSequenceResult {
    aliyah_results: [AliyahTaamSequenceResult; ALIYOT_PER_PARASHA],
}

impl ParashaTaamSequenceResult {
    /// The result of each aliyah, including those without matches.
    #[must_use]
    pub const fn aliyah_results(&self) -> &[AliyahTaamSequenceResult; ALIYOT_PER_PARASHA] {
        &self.aliyah_results
    }

    /// The aliyot with at least one matching verse.
    pub fn matching_aliyot(&self) -> impl Iterator<Item = &AliyahTaamSequenceResult> {
        self.aliyah_results.iter().filter(|result| !result.is_empty())
    }

    /// Returns `true` if no verse matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliyah_results.iter().all(AliyahTaamSequenceResult::is_empty)
    }

    /// The number of matching verses across all aliyot.
    #[must_use]
    pub fn verse_count(&self) -> usize {
        self.aliyah_results.iter().map(AliyahTaamSequenceResult::len).sum()
    }
}
