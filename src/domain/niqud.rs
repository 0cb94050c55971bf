use std::fmt;

use crate::domain::symbols::{InvalidSymbolError, NiqudName, niqud_name_of, niqud_symbol_of};

/// A vowel point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Niqud {
    name: NiqudName,
    symbol: char,
}

impl Niqud {
    /// Creates a vowel from its code point.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSymbolError::Symbol`] if the code point is not a vowel.
    pub fn from_symbol(symbol: char) -> Result<Self, InvalidSymbolError> {
        let name =
            niqud_name_of(symbol).ok_or_else(|| InvalidSymbolError::Symbol(symbol.to_string()))?;
        Ok(Self { name, symbol })
    }

    /// Creates a vowel from its name.
    #[must_use]
    pub const fn from_name(name: NiqudName) -> Self {
        Self {
            name,
            symbol: niqud_symbol_of(name),
        }
    }

    /// The vowel's name.
    #[must_use]
    pub const fn name(self) -> NiqudName {
        self.name
    }

    /// The vowel's code point.
    #[must_use]
    pub const fn symbol(self) -> char {
        self.symbol
    }
}

impl fmt::Display for Niqud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn niqud_from_name() {
        let niqud = Niqud::from_name(NiqudName::Qamats);
        assert_eq!(niqud.name(), NiqudName::Qamats);
        assert_eq!(niqud.symbol(), '\u{05B8}');
    }

    #[test]
    fn niqud_from_symbol() {
        let niqud = Niqud::from_symbol('\u{05B8}').unwrap();
        assert_eq!(niqud.name(), NiqudName::Qamats);
    }

    #[test]
    fn niqud_from_invalid_symbol() {
        let error = Niqud::from_symbol('\u{0591}').unwrap_err();
        assert_eq!(error, InvalidSymbolError::Symbol("\u{0591}".to_string()));
    }

    #[test]
    fn niqud_equality() {
        let q1 = Niqud::from_name(NiqudName::Qamats);
        let q2 = Niqud::from_name(NiqudName::Qamats);
        let p = Niqud::from_name(NiqudName::Patah);

        assert_eq!(q1, q2);
        assert_ne!(q1, p);
    }
}
