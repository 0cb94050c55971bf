use std::fmt;

use crate::domain::symbols::{InvalidSymbolError, TaamName, taam_name_of, taam_symbol_of};

/// A cantillation mark.
///
/// Marks are immutable values. Rewriting a mark produces a new value via
/// [`Taam::renamed`], which keeps the glyph that was actually written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Taam {
    name: TaamName,
    symbol: &'static str,
}

impl Taam {
    /// Creates a mark from a code point.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSymbolError::Symbol`] if the code point is not a
    /// cantillation mark.
    pub fn from_symbol(symbol: char) -> Result<Self, InvalidSymbolError> {
        let name =
            taam_name_of(symbol).ok_or_else(|| InvalidSymbolError::Symbol(symbol.to_string()))?;
        // the canonical spelling is used so that equal names compare equal
        let symbol = taam_symbol_of(name).ok_or_else(|| InvalidSymbolError::Name(name.to_string()))?;
        Ok(Self { name, symbol })
    }

    /// Creates a mark from its name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSymbolError::Name`] if the name has no symbol of its
    /// own (`azla` only ever arises from a rewrite).
    pub fn from_name(name: TaamName) -> Result<Self, InvalidSymbolError> {
        let symbol = taam_symbol_of(name).ok_or_else(|| InvalidSymbolError::Name(name.to_string()))?;
        Ok(Self { name, symbol })
    }

    /// Returns a copy of this mark under a different name.
    #[must_use]
    pub const fn renamed(self, name: TaamName) -> Self {
        Self {
            name,
            symbol: self.symbol,
        }
    }

    /// The mark's name.
    #[must_use]
    pub const fn name(&self) -> TaamName {
        self.name
    }

    /// The mark's written form.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Returns `true` if this is a servant mark.
    #[must_use]
    pub fn is_servant(&self) -> bool {
        self.name.is_servant()
    }
}

impl fmt::Display for Taam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}
