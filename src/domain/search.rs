//! Greedy, non-overlapping search for runs of cantillation marks.
//!
//! The search walks letters left to right and feeds each one into a small
//! state machine: a pattern cursor plus a buffer of the word indices touched
//! so far. There is no backtracking into an abandoned partial match.

use std::collections::BTreeMap;

use crate::domain::{Taam, TaamName};

/// The matches of a mark sequence within one verse.
///
/// Each match lists the (sorted, deduplicated) indices of the words it
/// touches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaamSequenceResult {
    matches: Vec<Vec<usize>>,
}

impl TaamSequenceResult {
    /// The word indices of each match, in order of occurrence.
    #[must_use]
    pub fn word_indices(&self) -> &[Vec<usize>] {
        &self.matches
    }

    /// Returns `true` if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if any match touches the word at `index`.
    #[must_use]
    pub fn touches(&self, index: usize) -> bool {
        self.matches
            .iter()
            .any(|words| words.binary_search(&index).is_ok())
    }
}

/// Frequency table of mark n-grams.
pub type TaamSequenceCounts = BTreeMap<Vec<TaamName>, usize>;

/// Adds every `other` count into `into`.
pub fn merge_counts(mut into: TaamSequenceCounts, other: TaamSequenceCounts) -> TaamSequenceCounts {
    for (sequence, count) in other {
        *into.entry(sequence).or_insert(0) += count;
    }
    into
}

/// Counts the contiguous n-grams of one mark stream into `counts`.
pub fn count_ngrams(names: &[TaamName], n: usize, counts: &mut TaamSequenceCounts) {
    if n == 0 {
        return;
    }
    for window in names.windows(n) {
        *counts.entry(window.to_vec()).or_insert(0) += 1;
    }
}

/// Incremental matcher over a stream of letters.
#[derive(Debug)]
pub struct SequenceMatcher {
    pattern: Vec<TaamName>,
    include_servants: bool,
    cursor: usize,
    buffer: Vec<usize>,
    matches: Vec<Vec<usize>>,
}

impl SequenceMatcher {
    /// Creates a matcher. When servants are excluded they are also dropped
    /// from the pattern itself.
    pub fn new(pattern: &[TaamName], include_servants: bool) -> Self {
        let pattern = pattern
            .iter()
            .copied()
            .filter(|name| include_servants || !name.is_servant())
            .collect();
        Self {
            pattern,
            include_servants,
            cursor: 0,
            buffer: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Feeds one letter's marks, tagged with the index of its word.
    pub fn feed(&mut self, word_index: usize, taamim: &[Taam]) {
        if self.pattern.is_empty() || self.skips(taamim) {
            return;
        }
        if self.cursor == self.pattern.len() {
            self.flush();
        }
        if self.accepts(taamim) {
            self.advance(word_index);
            return;
        }
        let partial = self.cursor > 0;
        self.reset();
        // a failed partial match restarts at the failing letter
        if partial && self.accepts(taamim) {
            self.advance(word_index);
        }
    }

    /// Completes the walk and returns the matches.
    pub fn finish(mut self) -> TaamSequenceResult {
        if !self.pattern.is_empty() && self.cursor == self.pattern.len() {
            self.flush();
        }
        TaamSequenceResult {
            matches: self.matches,
        }
    }

    fn skips(&self, taamim: &[Taam]) -> bool {
        taamim.is_empty() || (!self.include_servants && taamim.iter().all(Taam::is_servant))
    }

    fn accepts(&self, taamim: &[Taam]) -> bool {
        let expected = self.pattern[self.cursor];
        taamim.iter().any(|taam| taam.name() == expected)
    }

    fn advance(&mut self, word_index: usize) {
        self.buffer.push(word_index);
        self.cursor += 1;
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn flush(&mut self) {
        let mut words = std::mem::take(&mut self.buffer);
        words.sort_unstable();
        words.dedup();
        self.matches.push(words);
        self.cursor = 0;
    }
}
