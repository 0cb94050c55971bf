//! Words and the per-word mark disambiguation rules.
//!
//! A [`Word`] owns its letters exactly as parsed. Alongside them it keeps an
//! *accent view*: one list of marks per letter after disambiguation. The
//! accent view is derived from the letters and is recomputed whenever the
//! letters change. Renames performed by verse-level rewrites act on the
//! accent view only; the letters always reflect the source text.

use std::fmt;

use crate::domain::{
    Letter, Niqud, Taam, TaamName,
    letter::{clusters, rename_first},
    symbols::{PETUHAH, SETUMAH},
};

/// A paragraph break written as a one-letter word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphMarker {
    /// An open paragraph (`פ`).
    Petuhah,
    /// A closed paragraph (`ס`).
    Setumah,
}

/// A sequence of letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    letters: Vec<Letter>,
    accents: Vec<Vec<Taam>>,
}

impl Word {
    /// Builds a word from letters, applying the disambiguation rules.
    #[must_use]
    pub fn new(letters: Vec<Letter>) -> Self {
        let accents = disambiguate(&letters);
        Self { letters, accents }
    }

    /// Parses a whitespace-free token into a word.
    ///
    /// Characters before the first base letter are dropped, so a token with
    /// no Hebrew letters produces an empty word.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        Self::new(clusters(token).filter_map(Letter::from_cluster).collect())
    }

    /// The letters of the word.
    #[must_use]
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// The number of letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns `true` if the word has no letters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The marks exactly as written, in letter order.
    pub fn taamim_raw(&self) -> impl Iterator<Item = &Taam> {
        self.letters.iter().flat_map(Letter::taamim)
    }

    /// The disambiguated marks, in letter order.
    pub fn taamim(&self) -> impl Iterator<Item = &Taam> {
        self.accents.iter().flatten()
    }

    /// The disambiguated marks with servant marks removed.
    pub fn taamim_without_meshartim(&self) -> impl Iterator<Item = &Taam> {
        self.taamim().filter(|taam| !taam.is_servant())
    }

    /// The disambiguated marks grouped by letter, parallel to
    /// [`Word::letters`].
    #[must_use]
    pub fn letter_taamim(&self) -> &[Vec<Taam>] {
        &self.accents
    }

    /// The vowels, in letter order.
    pub fn nequdot(&self) -> impl Iterator<Item = &Niqud> {
        self.letters.iter().flat_map(Letter::nequdot)
    }

    /// Returns `true` if the disambiguated marks include `name`.
    #[must_use]
    pub fn has_taam(&self, name: TaamName) -> bool {
        self.taamim().any(|taam| taam.name() == name)
    }

    /// Renames the first disambiguated mark called `old` (in letter order).
    ///
    /// Returns `true` if a mark was renamed.
    pub fn rename_taam(&mut self, old: TaamName, new: TaamName) -> bool {
        self.accents
            .iter_mut()
            .any(|marks| rename_first(marks, old, new))
    }

    /// Appends a mark to the last letter and re-runs disambiguation.
    ///
    /// Any earlier renames are discarded along with the old accent view.
    /// Returns `false` if the word has no letters.
    pub fn push_taam(&mut self, taam: Taam) -> bool {
        let Some(last) = self.letters.last_mut() else {
            return false;
        };
        last.add_taam(taam);
        self.accents = disambiguate(&self.letters);
        true
    }

    /// The paragraph break this word stands for, if any.
    #[must_use]
    pub fn paragraph_marker(&self) -> Option<ParagraphMarker> {
        match self.letters.as_slice() {
            [letter] if letter.letter() == PETUHAH => Some(ParagraphMarker::Petuhah),
            [letter] if letter.letter() == SETUMAH => Some(ParagraphMarker::Setumah),
            _ => None,
        }
    }

    /// Returns `true` if this word is an open paragraph marker.
    #[must_use]
    pub fn is_petuhah(&self) -> bool {
        self.paragraph_marker() == Some(ParagraphMarker::Petuhah)
    }

    /// Returns `true` if this word is a closed paragraph marker.
    #[must_use]
    pub fn is_setumah(&self) -> bool {
        self.paragraph_marker() == Some(ParagraphMarker::Setumah)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.letters {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

/// Computes the accent view of a word.
///
/// The rules look at every mark written on the word, meteg included:
/// - exactly two pashtas collapse into a single `tere_qadmin`, on the letter
///   of the first;
/// - a lone pashta that is not on the last letter is a `qadma`;
/// - anything else passes through.
///
/// Meteg (`maamid`) is a stress marker rather than an accent, so it is
/// dropped once the rules have run.
fn disambiguate(letters: &[Letter]) -> Vec<Vec<Taam>> {
    let mut accents: Vec<Vec<Taam>> = letters
        .iter()
        .map(|letter| letter.taamim().to_vec())
        .collect();

    let positions: Vec<(usize, usize)> = accents
        .iter()
        .enumerate()
        .flat_map(|(l, marks)| (0..marks.len()).map(move |m| (l, m)))
        .collect();
    let names: Vec<TaamName> = positions
        .iter()
        .map(|&(l, m)| accents[l][m].name())
        .collect();

    match (positions.as_slice(), names.as_slice()) {
        ([first, second], [TaamName::Pashta, TaamName::Pashta]) => {
            let (l1, m1) = *first;
            let (l2, m2) = *second;
            let collapsed = Taam::from_name(TaamName::TereQadmin)
                .unwrap_or_else(|_| accents[l1][m1].renamed(TaamName::TereQadmin));
            accents[l2].remove(m2);
            accents[l1][m1] = collapsed;
        }
        ([only], [TaamName::Pashta]) => {
            let ends_with_pashta = letters
                .last()
                .is_some_and(|letter| letter.has_taam(TaamName::Pashta));
            if !ends_with_pashta {
                let (l, m) = *only;
                accents[l][m] = accents[l][m].renamed(TaamName::Qadma);
            }
        }
        _ => {}
    }

    for marks in &mut accents {
        marks.retain(|taam| taam.name() != TaamName::Maamid);
    }
    accents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(taamim: impl Iterator<Item = &'a Taam>) -> Vec<TaamName> {
        taamim.map(Taam::name).collect()
    }

    #[test]
    fn word_with_one_taam() {
        let word = Word::parse("בְּרֵאשִׁ֖ית");
        assert_eq!(names(word.taamim()), vec![TaamName::Tarha]);
        assert_eq!(names(word.taamim_without_meshartim()), vec![TaamName::Tarha]);
        assert_eq!(word.len(), 6);
    }

    #[test]
    fn two_pashtas_collapse_to_tere_qadmin() {
        let word = Word::parse("תֹ֙הוּ֙");
        assert_eq!(
            names(word.taamim_raw()),
            vec![TaamName::Pashta, TaamName::Pashta]
        );
        assert_eq!(names(word.taamim()), vec![TaamName::TereQadmin]);
        assert_eq!(
            names(word.taamim_without_meshartim()),
            vec![TaamName::TereQadmin]
        );
        assert!(word.has_taam(TaamName::TereQadmin));
        assert!(!word.has_taam(TaamName::Pashta));
        // the letters themselves are untouched
        assert!(word.letters()[0].has_taam(TaamName::Pashta));
    }

    #[test]
    fn medial_pashta_is_qadma() {
        // pashta on the first of two letters
        let word = Word::parse("ל\u{0599}א");
        assert_eq!(names(word.taamim_raw()), vec![TaamName::Pashta]);
        assert_eq!(names(word.taamim()), vec![TaamName::Qadma]);
        assert!(word.taamim_without_meshartim().next().is_none());
    }

    #[test]
    fn final_pashta_is_kept() {
        let word = Word::parse("לָאוֹר֙");
        assert_eq!(names(word.taamim()), vec![TaamName::Pashta]);
        assert_eq!(word.taamim_without_meshartim().count(), 1);
    }

    #[test]
    fn one_letter_pashta_stays_pashta() {
        let word = Word::parse("ל\u{0599}");
        assert_eq!(names(word.taamim()), vec![TaamName::Pashta]);
    }

    #[test]
    fn meteg_counts_towards_the_pashta_rules() {
        // meteg plus a medial pashta is two marks, so no qadma
        let word = Word::parse("ו\u{05BD}ל\u{0599}א");
        assert_eq!(
            names(word.taamim_raw()),
            vec![TaamName::Maamid, TaamName::Pashta]
        );
        assert_eq!(names(word.taamim()), vec![TaamName::Pashta]);

        // meteg plus two pashtas is three marks, so no tere_qadmin
        let word = Word::parse("ו\u{05BD}ל\u{0599}א\u{0599}");
        assert_eq!(
            names(word.taamim()),
            vec![TaamName::Pashta, TaamName::Pashta]
        );
    }

    #[test]
    fn meteg_is_not_an_accent() {
        let word = Word::parse("הָאָֽרֶץ׃");
        assert_eq!(
            names(word.taamim_raw()),
            vec![TaamName::Maamid, TaamName::SofPassuq]
        );
        assert_eq!(names(word.taamim()), vec![TaamName::SofPassuq]);
    }

    #[test]
    fn meshartim_are_filtered() {
        let word = Word::parse("וַיֹּ֣אמֶר");
        assert_eq!(names(word.taamim_raw()), vec![TaamName::ShofarHolekh]);
        assert_eq!(names(word.taamim()), vec![TaamName::ShofarHolekh]);
        assert!(word.taamim_without_meshartim().next().is_none());
    }

    #[test]
    fn rename_taam() {
        let mut word = Word::parse("לָאוֹר֙");
        assert!(word.has_taam(TaamName::Pashta));
        assert_eq!(word.taamim_without_meshartim().count(), 1);

        assert!(word.rename_taam(TaamName::Pashta, TaamName::Qadma));
        assert!(!word.has_taam(TaamName::Pashta));
        assert!(word.has_taam(TaamName::Qadma));
        assert_eq!(word.taamim_without_meshartim().count(), 0);

        assert!(!word.rename_taam(TaamName::Pashta, TaamName::Qadma));
    }

    #[test]
    fn rename_stops_at_first_match() {
        let tarha = Taam::from_name(TaamName::Tarha).unwrap();
        let letters = vec![
            Letter::with_marks('א', vec![tarha], Vec::new()),
            Letter::with_marks('ב', vec![tarha], Vec::new()),
        ];
        let mut word = Word::new(letters);
        assert!(word.rename_taam(TaamName::Tarha, TaamName::Tevir));
        assert_eq!(names(word.taamim()), vec![TaamName::Tevir, TaamName::Tarha]);
    }

    #[test]
    fn push_taam_reruns_disambiguation() {
        let mut word = Word::parse("ל\u{0599}א");
        assert!(word.has_taam(TaamName::Qadma));
        assert!(word.push_taam(Taam::from_name(TaamName::Pashta).unwrap()));
        assert_eq!(names(word.taamim()), vec![TaamName::TereQadmin]);

        let mut empty = Word::parse("1");
        assert!(empty.is_empty());
        assert!(!empty.push_taam(Taam::from_name(TaamName::Paseq).unwrap()));
    }

    #[test]
    fn paragraph_markers() {
        assert!(Word::parse("פ").is_petuhah());
        assert!(Word::parse("ס").is_setumah());
        assert_eq!(Word::parse("פס").paragraph_marker(), None);
        assert_eq!(Word::parse("").paragraph_marker(), None);
    }

    #[test]
    fn display_round_trips_clean_text() {
        let text = "בְּרֵאשִׁ֖ית";
        assert_eq!(Word::parse(text).to_string(), text);
    }
}
