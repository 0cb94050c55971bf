use std::{fmt, str::FromStr};

use crate::domain::{
    Niqud, Taam, TaamName,
    symbols::{MAQAF, is_base_letter, niqud_name_of, taam_name_of},
};

/// A base letter with the vowels and marks written on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    letter: char,
    taamim: Vec<Taam>,
    nequdot: Vec<Niqud>,
}

impl Letter {
    /// A bare letter with no vowels or marks.
    #[must_use]
    pub const fn new(letter: char) -> Self {
        Self::with_marks(letter, Vec::new(), Vec::new())
    }

    /// A letter with the given marks and vowels.
    #[must_use]
    pub const fn with_marks(letter: char, taamim: Vec<Taam>, nequdot: Vec<Niqud>) -> Self {
        Self {
            letter,
            taamim,
            nequdot,
        }
    }

    /// Annotates a letter cluster: one base letter followed by combining
    /// characters.
    ///
    /// Marks and vowels are attached in the order they are written.
    /// Combining characters that are neither are skipped.
    ///
    /// Returns `None` if the cluster does not start with a base letter.
    #[must_use]
    pub fn from_cluster(cluster: &str) -> Option<Self> {
        let mut chars = cluster.chars();
        let base = chars.next().filter(|&c| is_base_letter(c))?;
        let mut letter = Self::new(base);
        for c in chars {
            letter.attach(c);
        }
        Some(letter)
    }

    /// Attaches a combining character, if it is a known mark or vowel.
    ///
    /// Returns `false` if the character was skipped.
    pub(crate) fn attach(&mut self, c: char) -> bool {
        if taam_name_of(c).is_some() {
            if let Ok(taam) = Taam::from_symbol(c) {
                self.taamim.push(taam);
                return true;
            }
        } else if niqud_name_of(c).is_some() {
            if let Ok(niqud) = Niqud::from_symbol(c) {
                self.nequdot.push(niqud);
                return true;
            }
        }
        false
    }

    /// The base letter.
    #[must_use]
    pub const fn letter(&self) -> char {
        self.letter
    }

    /// The marks written on this letter.
    #[must_use]
    pub fn taamim(&self) -> &[Taam] {
        &self.taamim
    }

    /// The vowels written on this letter.
    #[must_use]
    pub fn nequdot(&self) -> &[Niqud] {
        &self.nequdot
    }

    /// Returns `true` if this letter is a maqaf.
    #[must_use]
    pub const fn is_maqaf(&self) -> bool {
        self.letter == MAQAF
    }

    /// Appends a mark.
    pub fn add_taam(&mut self, taam: Taam) {
        self.taamim.push(taam);
    }

    /// Appends a vowel.
    pub fn add_niqud(&mut self, niqud: Niqud) {
        self.nequdot.push(niqud);
    }

    /// Returns `true` if this letter carries the named mark.
    #[must_use]
    pub fn has_taam(&self, name: TaamName) -> bool {
        self.taamim.iter().any(|taam| taam.name() == name)
    }

    /// Renames the first mark called `old` to `new`.
    ///
    /// Returns `true` if a mark was renamed.
    pub fn rename_taam(&mut self, old: TaamName, new: TaamName) -> bool {
        rename_first(&mut self.taamim, old, new)
    }
}

/// Replaces the first mark named `old` with a copy named `new`.
pub fn rename_first(taamim: &mut [Taam], old: TaamName, new: TaamName) -> bool {
    match taamim.iter_mut().find(|taam| taam.name() == old) {
        Some(slot) => {
            *slot = slot.renamed(new);
            true
        }
        None => false,
    }
}

/// Error returned when a cluster does not start with a base letter.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Letter cluster '{0}' does not start with a Hebrew letter")]
pub struct NotALetterError(String);

impl FromStr for Letter {
    type Err = NotALetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_cluster(s).ok_or_else(|| NotALetterError(s.to_string()))
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)?;
        for niqud in &self.nequdot {
            write!(f, "{niqud}")?;
        }
        for taam in &self.taamim {
            write!(f, "{taam}")?;
        }
        Ok(())
    }
}

/// Splits a token into letter clusters.
///
/// A cluster starts at every base letter and extends up to the next one.
/// Anything before the first base letter belongs to no cluster and is dropped.
pub fn clusters(token: &str) -> impl Iterator<Item = &str> {
    let starts: Vec<usize> = token
        .char_indices()
        .filter(|&(_, c)| is_base_letter(c))
        .map(|(i, _)| i)
        .collect();
    let ends: Vec<usize> = starts
        .iter()
        .skip(1)
        .copied()
        .chain(std::iter::once(token.len()))
        .collect();
    starts
        .into_iter()
        .zip(ends)
        .map(move |(start, end)| &token[start..end])
}
