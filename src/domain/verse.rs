use std::fmt;

use nonempty::NonEmpty;

use crate::domain::{
    Error, Letter, Niqud, Taam, TaamName, Word,
    search::{SequenceMatcher, TaamSequenceCounts, TaamSequenceResult, count_ngrams},
    symbols::{LRE, PASEQ, PDF},
};

/// A verse: a non-empty sequence of words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    idx: usize,
    words: NonEmpty<Word>,
}

impl Verse {
    /// Creates a verse from already-built words.
    #[must_use]
    pub const fn new(idx: usize, words: NonEmpty<Word>) -> Self {
        Self { idx, words }
    }

    /// Parses a verse line.
    ///
    /// The line is split on whitespace. A token that is only a paseq is
    /// attached to the last letter of the previous word. A qadma on a word
    /// that is followed by (or itself carries) a gerish becomes an azla.
    /// Empty words at either end are trimmed.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] if a paseq has no letter to attach to.
    /// - [`Error::StructuralInvariant`] if no word remains after trimming.
    pub fn parse(idx: usize, line: &str) -> Result<Self, Error> {
        let mut words: Vec<Word> = Vec::new();
        for token in line.split_whitespace() {
            if is_paseq_token(token) {
                let paseq = Taam::from_symbol(PASEQ)?;
                let attached = words.last_mut().is_some_and(|word| word.push_taam(paseq));
                if !attached {
                    return Err(Error::MalformedInput(format!(
                        "paseq with no preceding letter in verse {idx}"
                    )));
                }
                continue;
            }
            words.push(Word::parse(token));
        }

        promote_azla(&mut words);

        let words = trim_empty(words);
        let words = NonEmpty::from_vec(words)
            .ok_or_else(|| Error::StructuralInvariant(format!("verse {idx} has no words")))?;
        Ok(Self::new(idx, words))
    }

    /// The index of the verse within its chapter.
    #[must_use]
    pub const fn idx(&self) -> usize {
        self.idx
    }

    /// The words of the verse.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    /// The word at `index`.
    #[must_use]
    pub fn word(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    /// The number of words, including paragraph markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`: a verse has at least one word.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The words that are not paragraph markers.
    pub fn taam_words(&self) -> impl Iterator<Item = &Word> {
        self.words()
            .filter(|word| word.paragraph_marker().is_none())
    }

    /// All letters, in order.
    pub fn letters(&self) -> impl Iterator<Item = &Letter> {
        self.words().flat_map(Word::letters)
    }

    /// All disambiguated marks, in order.
    pub fn taamim(&self) -> impl Iterator<Item = &Taam> {
        self.words().flat_map(Word::taamim)
    }

    /// All disambiguated marks except servant marks, in order.
    pub fn taamim_without_meshartim(&self) -> impl Iterator<Item = &Taam> {
        self.words().flat_map(Word::taamim_without_meshartim)
    }

    /// All vowels, in order.
    pub fn nequdot(&self) -> impl Iterator<Item = &Niqud> {
        self.letters().flat_map(Letter::nequdot)
    }

    /// The names of the disambiguated marks, optionally without servants.
    #[must_use]
    pub fn taam_names(&self, include_servants: bool) -> Vec<TaamName> {
        if include_servants {
            self.taamim().map(Taam::name).collect()
        } else {
            self.taamim_without_meshartim().map(Taam::name).collect()
        }
    }

    /// Returns `true` if any word carries the mark.
    #[must_use]
    pub fn has_taam(&self, name: TaamName) -> bool {
        self.words().any(|word| word.has_taam(name))
    }

    /// The number of words carrying the mark.
    #[must_use]
    pub fn count_taam(&self, name: TaamName) -> usize {
        self.words().filter(|word| word.has_taam(name)).count()
    }

    /// Returns `true` if the marks contain `sequence` as a contiguous run.
    #[must_use]
    pub fn has_taam_sequence(&self, sequence: &[TaamName], include_servants: bool) -> bool {
        if sequence.is_empty() {
            return false;
        }
        self.taam_names(include_servants)
            .windows(sequence.len())
            .any(|window| window == sequence)
    }

    /// Finds every greedy, non-overlapping occurrence of `pattern`.
    ///
    /// When servants are excluded they are removed from the pattern as well
    /// as from the verse.
    #[must_use]
    pub fn find_taam_sequence(&self, pattern: &[TaamName], include_servants: bool) -> TaamSequenceResult {
        let mut matcher = SequenceMatcher::new(pattern, include_servants);
        for (word_index, word) in self.words().enumerate() {
            for taamim in word.letter_taamim() {
                matcher.feed(word_index, taamim);
            }
        }
        matcher.finish()
    }

    /// Counts the contiguous runs of `n` marks in this verse.
    #[must_use]
    pub fn count_n_taam_sequences(&self, n: usize, include_servants: bool) -> TaamSequenceCounts {
        let mut counts = TaamSequenceCounts::new();
        count_ngrams(&self.taam_names(include_servants), n, &mut counts);
        counts
    }
}

impl fmt::Display for Verse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LRE}")?;
        for (i, word) in self.words().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{word}")?;
        }
        write!(f, "{PDF}")
    }
}

fn is_paseq_token(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some(PASEQ) && chars.next().is_none()
}

/// Renames a qadma to azla when its word is followed by, or itself carries, a
/// gerish. Only adjacent pairs are considered, so the final word is never
/// rewritten.
fn promote_azla(words: &mut [Word]) {
    for i in 1..words.len() {
        let next_has_gerish = words[i].has_taam(TaamName::Gerish);
        let word = &mut words[i - 1];
        if word.has_taam(TaamName::Qadma) && (next_has_gerish || word.has_taam(TaamName::Gerish)) {
            word.rename_taam(TaamName::Qadma, TaamName::Azla);
        }
    }
}

fn trim_empty(mut words: Vec<Word>) -> Vec<Word> {
    while words.last().is_some_and(Word::is_empty) {
        words.pop();
    }
    let leading = words.iter().take_while(|word| word.is_empty()).count();
    words.drain(..leading);
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS_1_1: &str = "בְּרֵאשִׁ֖ית בָּרָ֣א אֱלֹהִ֑ים אֵ֥ת הַשָּׁמַ֖יִם וְאֵ֥ת הָאָֽרֶץ׃";
    const GENESIS_1_5: &str = "וַיִּקְרָ֨א אֱלֹהִ֤ים ׀ לָאוֹר֙ י֔וֹם וְלַחֹ֖שֶׁךְ קָ֣רָא לָ֑יְלָה וַֽיְהִי־עֶ֥רֶב וַֽיְהִי־בֹ֖קֶר י֥וֹם אֶחָֽד׃";
    const GENESIS_1_9: &str = "וַיֹּ֣אמֶר אֱלֹהִ֗ים יִקָּו֨וּ הַמַּ֜יִם מִתַּ֤חַת הַשָּׁמַ֙יִם֙ אֶל־מָק֣וֹם אֶחָ֔ד וְתֵרָאֶ֖ה הַיַּבָּשָׁ֑ה וַֽיְהִי־כֵֽן׃";

    #[test]
    fn verse_from_string() {
        let verse = Verse::parse(1, GENESIS_1_1).unwrap();
        assert_eq!(
            verse.taam_names(true),
            vec![
                TaamName::Tarha,
                TaamName::ShofarHolekh,
                TaamName::Atnah,
                TaamName::Maarikh,
                TaamName::Tarha,
                TaamName::Maarikh,
                TaamName::SofPassuq,
            ]
        );
        assert_eq!(
            verse.taam_names(false),
            vec![
                TaamName::Tarha,
                TaamName::Atnah,
                TaamName::Tarha,
                TaamName::SofPassuq,
            ]
        );
        assert_eq!(verse.len(), 7);
    }

    #[test]
    fn raw_marks_keep_meteg() {
        let verse = Verse::parse(1, GENESIS_1_1).unwrap();
        let raw: Vec<TaamName> = verse
            .words()
            .flat_map(Word::taamim_raw)
            .map(Taam::name)
            .collect();
        assert_eq!(raw.len(), 8);
        assert_eq!(raw[6], TaamName::Maamid);
    }

    #[test]
    fn standalone_paseq_attaches_to_previous_word() {
        let verse = Verse::parse(5, GENESIS_1_5).unwrap();
        assert!(verse.has_taam(TaamName::Paseq));
        // the paseq token does not become a word of its own
        assert_eq!(verse.len(), 11);
        let elohim = verse.word(1).unwrap();
        assert!(elohim.letters().last().unwrap().has_taam(TaamName::Paseq));
    }

    #[test]
    fn attached_paseq_is_a_mark() {
        let verse = Verse::parse(5, "וַיִּקְרָ֨א אֱלֹהִ֤ים׀ לָאוֹר֙").unwrap();
        assert!(verse.has_taam(TaamName::Paseq));
        assert!(verse.has_taam(TaamName::Qadma));
    }

    #[test]
    fn paseq_without_preceding_letter_is_malformed() {
        let error = Verse::parse(1, "׀ בְּרֵאשִׁ֖ית").unwrap_err();
        assert!(matches!(error, Error::MalformedInput(_)));
    }

    #[test]
    fn qadma_before_gerish_becomes_azla() {
        let verse = Verse::parse(9, GENESIS_1_9).unwrap();
        assert!(verse.has_taam(TaamName::Azla));
        assert!(verse.has_taam(TaamName::Gerish));
        assert!(verse.word(2).unwrap().has_taam(TaamName::Azla));
        assert!(!verse.word(2).unwrap().has_taam(TaamName::Qadma));
    }

    #[test]
    fn medial_pashta_before_gerish_becomes_azla() {
        let verse = Verse::parse(1, "ל\u{0599}א ה\u{059C}").unwrap();
        assert_eq!(
            verse.taam_names(true),
            vec![TaamName::Azla, TaamName::Gerish]
        );
    }

    #[test]
    fn qadma_without_gerish_is_kept() {
        let verse = Verse::parse(1, "ל\u{05A8}א ה\u{0596}").unwrap();
        assert_eq!(
            verse.taam_names(true),
            vec![TaamName::Qadma, TaamName::Tarha]
        );
    }

    #[test]
    fn qadma_with_own_gerish_becomes_azla() {
        let verse = Verse::parse(1, "ל\u{05A8}א\u{059C} ה\u{0596}").unwrap();
        assert_eq!(
            verse.taam_names(true),
            vec![TaamName::Azla, TaamName::Gerish, TaamName::Tarha]
        );
    }

    #[test]
    fn boundary_empty_words_are_trimmed() {
        let line = format!("\u{202B} 1  ׃1   {GENESIS_1_1} \u{202C}");
        let verse = Verse::parse(1, &line).unwrap();
        assert_eq!(verse.len(), 7);
        assert!(!verse.words().next().unwrap().is_empty());
        assert!(!verse.words().last().unwrap().is_empty());
    }

    #[test]
    fn verse_without_words_is_rejected() {
        let error = Verse::parse(3, "\u{202B} 3 \u{202C}").unwrap_err();
        assert!(matches!(error, Error::StructuralInvariant(_)));
    }

    #[test]
    fn paragraph_markers_are_not_taam_words() {
        let line = format!("{GENESIS_1_5} פ");
        let verse = Verse::parse(5, &line).unwrap();
        assert_eq!(verse.len(), 12);
        assert_eq!(verse.taam_words().count(), 11);
    }

    #[test]
    fn has_taam() {
        let verse = Verse::parse(1, GENESIS_1_1).unwrap();
        assert!(verse.has_taam(TaamName::Tarha));
        assert!(!verse.has_taam(TaamName::ZaqefQaton));
    }

    #[test]
    fn count_taam_counts_words() {
        let verse = Verse::parse(1, GENESIS_1_1).unwrap();
        assert_eq!(verse.count_taam(TaamName::Tarha), 2);
        assert_eq!(verse.count_taam(TaamName::ZaqefQaton), 0);
    }

    #[test]
    fn find_taam_sequence() {
        let verse = Verse::parse(1, GENESIS_1_1).unwrap();
        let sequence = [TaamName::Tarha, TaamName::Atnah, TaamName::Tarha];

        assert_eq!(
            verse.find_taam_sequence(&sequence, false).word_indices(),
            &[vec![0, 2, 4]]
        );
        assert_eq!(
            verse.find_taam_sequence(&[TaamName::Tarha], false).word_indices(),
            &[vec![0], vec![4]]
        );
        assert!(verse.find_taam_sequence(&sequence, true).is_empty());
    }

    #[test]
    fn find_taam_sequence_with_servants() {
        let verse = Verse::parse(1, GENESIS_1_1).unwrap();
        let result = verse.find_taam_sequence(&[TaamName::Maarikh, TaamName::Tarha], true);
        assert_eq!(result.word_indices(), &[vec![3, 4]]);
    }

    #[test]
    fn find_taam_sequence_across_paseq() {
        let verse = Verse::parse(5, GENESIS_1_5).unwrap();
        let result = verse.find_taam_sequence(&[TaamName::Paseq, TaamName::Pashta], true);
        assert_eq!(result.word_indices(), &[vec![1, 2]]);
    }

    #[test]
    fn find_taam_sequence_edge_cases() {
        let verse = Verse::parse(1, GENESIS_1_1).unwrap();
        assert!(verse.find_taam_sequence(&[], true).is_empty());
        let long = [TaamName::Tarha; 9];
        assert!(verse.find_taam_sequence(&long, true).is_empty());
        assert!(verse.find_taam_sequence(&long, false).is_empty());
    }

    #[test]
    fn has_taam_sequence() {
        let verse = Verse::parse(1, GENESIS_1_1).unwrap();
        assert!(verse.has_taam_sequence(&[TaamName::Atnah, TaamName::Maarikh], true));
        assert!(!verse.has_taam_sequence(&[TaamName::Atnah, TaamName::Maarikh], false));
        assert!(verse.has_taam_sequence(&[TaamName::Atnah, TaamName::Tarha], false));
        assert!(!verse.has_taam_sequence(&[], true));
    }

    #[test]
    fn ngram_counts() {
        let verse = Verse::parse(1, GENESIS_1_1).unwrap();
        let counts = verse.count_n_taam_sequences(2, false);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[&vec![TaamName::Tarha, TaamName::Atnah]], 1);

        let with_servants = verse.count_n_taam_sequences(2, true);
        assert_eq!(with_servants[&vec![TaamName::Maarikh, TaamName::Tarha]], 1);
        assert_eq!(with_servants.values().sum::<usize>(), 6);
        assert!(verse.count_n_taam_sequences(0, true).is_empty());
    }

    #[test]
    fn display_wraps_in_directional_marks() {
        let verse = Verse::parse(1, GENESIS_1_1).unwrap();
        let rendered = verse.to_string();
        assert!(rendered.starts_with(LRE));
        assert!(rendered.ends_with(PDF));
        assert_eq!(rendered.trim_matches([LRE, PDF]), GENESIS_1_1);
    }
}
