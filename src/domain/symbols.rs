//! Fixed symbol tables for cantillation marks (ta'amim) and vowel points
//! (niqud).
//!
//! All tables are compile-time data: lookups are plain `match` expressions, so
//! there is no global state to initialise or mutate.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Left-to-right embedding control character.
pub const LRE: char = '\u{202A}';

/// Right-to-left embedding control character. Marks the start of a verse line.
pub const RLE: char = '\u{202B}';

/// Pop directional formatting control character.
pub const PDF: char = '\u{202C}';

/// The maqaf (word-hyphenation divider).
pub const MAQAF: char = '\u{05BE}';

/// Stand-alone paseq token.
pub const PASEQ: char = '\u{05C0}';

/// Single-letter word marking an open paragraph break.
pub const PETUHAH: char = 'פ';

/// Single-letter word marking a closed paragraph break.
pub const SETUMAH: char = 'ס';

/// The characters that start a new letter cluster.
///
/// The maqaf is treated as a base letter so that it becomes its own
/// (mark-less) letter within a hyphenated word.
pub const LETTERS: &str = "־אבגדהוזחטיכלמנסעפצקרשתךםןףץ";

/// Returns `true` if the character starts a new letter cluster.
#[must_use]
pub fn is_base_letter(c: char) -> bool {
    LETTERS.contains(c)
}

/// Error returned when a mark or vowel cannot be resolved.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum InvalidSymbolError {
    /// The code point is not a known mark or vowel.
    #[error("Invalid symbol: {0:?}")]
    Symbol(String),

    /// The name is unknown, or has no symbol of its own.
    #[error("Invalid name: {0}")]
    Name(String),
}

/// Canonical names of the cantillation marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaamName {
    /// Etnahta.
    Atnah,
    /// Segolta.
    Segolta,
    /// Shalshelet.
    Shalshelet,
    /// Zaqef qaton.
    ZaqefQaton,
    /// Zaqef gadol.
    ZaqefGadol,
    /// Tipeha.
    Tarha,
    /// Revia.
    Ravia,
    /// Zarqa.
    Zarqa,
    /// Pashta.
    Pashta,
    /// Yetiv.
    Yetiv,
    /// Tevir.
    Tevir,
    /// Geresh.
    Gerish,
    /// Gershayim.
    SheneGerishin,
    /// Qarne farah.
    KarneFarah,
    /// Telisha gedola.
    Tarsa,
    /// Pazer gadol.
    PazerGadol,
    /// Yerah ben yomo.
    YareahBenYomo,
    /// Munah.
    ShofarHolekh,
    /// Mahapakh.
    ShofarMehupakh,
    /// Merkha.
    Maarikh,
    /// Merkha kefula.
    TereTaame,
    /// Darga.
    Darga,
    /// Qadma.
    Qadma,
    /// Two pashtas on one word.
    TereQadmin,
    /// Telisha qetana.
    Talsha,
    /// Meteg.
    Maamid,
    /// Paseq.
    Paseq,
    /// Sof pasuq.
    SofPassuq,
    /// Azla: a qadma bound to a following geresh. Has no glyph of its own.
    Azla,
}

impl TaamName {
    /// Every mark name, in table order.
    pub const ALL: [Self; 29] = [
        Self::Atnah,
        Self::Segolta,
        Self::Shalshelet,
        Self::ZaqefQaton,
        Self::ZaqefGadol,
        Self::Tarha,
        Self::Ravia,
        Self::Zarqa,
        Self::Pashta,
        Self::Yetiv,
        Self::Tevir,
        Self::Gerish,
        Self::SheneGerishin,
        Self::KarneFarah,
        Self::Tarsa,
        Self::PazerGadol,
        Self::YareahBenYomo,
        Self::ShofarHolekh,
        Self::ShofarMehupakh,
        Self::Maarikh,
        Self::TereTaame,
        Self::Darga,
        Self::Qadma,
        Self::TereQadmin,
        Self::Talsha,
        Self::Maamid,
        Self::Paseq,
        Self::SofPassuq,
        Self::Azla,
    ];

    /// The canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atnah => "atnah",
            Self::Segolta => "segolta",
            Self::Shalshelet => "shalshelet",
            Self::ZaqefQaton => "zaqef_qaton",
            Self::ZaqefGadol => "zaqef_gadol",
            Self::Tarha => "tarha",
            Self::Ravia => "ravia",
            Self::Zarqa => "zarqa",
            Self::Pashta => "pashta",
            Self::Yetiv => "yetiv",
            Self::Tevir => "tevir",
            Self::Gerish => "gerish",
            Self::SheneGerishin => "shene_gerishin",
            Self::KarneFarah => "karne_farah",
            Self::Tarsa => "tarsa",
            Self::PazerGadol => "pazer_gadol",
            Self::YareahBenYomo => "yareah_ben_yomo",
            Self::ShofarHolekh => "shofar_holekh",
            Self::ShofarMehupakh => "shofar_mehupakh",
            Self::Maarikh => "maarikh",
            Self::TereTaame => "tere_taame",
            Self::Darga => "darga",
            Self::Qadma => "qadma",
            Self::TereQadmin => "tere_qadmin",
            Self::Talsha => "talsha",
            Self::Maamid => "maamid",
            Self::Paseq => "paseq",
            Self::SofPassuq => "sof_passuq",
            Self::Azla => "azla",
        }
    }

    /// The traditional Hebrew name of the mark.
    #[must_use]
    pub const fn hebrew_name(self) -> &'static str {
        match self {
            Self::Atnah => "אתנח",
            Self::Segolta => "סגולתא",
            Self::Shalshelet => "שלשלת",
            Self::ZaqefQaton => "זקף קטון",
            Self::ZaqefGadol => "זקף גדול",
            Self::Tarha => "טרחא",
            Self::Ravia => "רביע",
            Self::Zarqa => "זרקא",
            Self::Pashta => "פשתא",
            Self::Yetiv => "יתיב",
            Self::Tevir => "תביר",
            Self::Gerish => "גריש",
            Self::SheneGerishin => "שני גרשין",
            Self::KarneFarah => "קרני פרה",
            Self::Tarsa => "תרסא",
            Self::PazerGadol => "פזר גדול",
            Self::YareahBenYomo => "ירח בן יומו",
            Self::ShofarHolekh => "שופר הולך",
            Self::ShofarMehupakh => "שופר מהופך",
            Self::Maarikh => "מאריך",
            Self::TereTaame => "תרי טעמי",
            Self::Darga => "דרגא",
            Self::Qadma => "קדמא",
            Self::TereQadmin => "תרי קדמין",
            Self::Talsha => "טלשא",
            Self::Maamid => "מעמיד",
            Self::Paseq => "פסק",
            Self::SofPassuq => "סוף פסוק",
            Self::Azla => "אזלא",
        }
    }

    /// Looks up a mark by its Hebrew name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSymbolError::Name`] if no mark has this Hebrew name.
    pub fn from_hebrew_name(name: &str) -> Result<Self, InvalidSymbolError> {
        Self::ALL
            .into_iter()
            .find(|taam| taam.hebrew_name() == name)
            .ok_or_else(|| InvalidSymbolError::Name(name.to_string()))
    }

    /// Returns `true` if this is a servant (conjunctive) mark.
    #[must_use]
    pub fn is_servant(self) -> bool {
        is_servant(self)
    }
}

impl fmt::Display for TaamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaamName {
    type Err = InvalidSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|taam| taam.as_str() == s)
            .ok_or_else(|| InvalidSymbolError::Name(s.to_string()))
    }
}

/// The servant (conjunctive) marks, the meshartim.
pub const MESHARTIM: [TaamName; 8] = [
    TaamName::Maamid,
    TaamName::ShofarHolekh,
    TaamName::ShofarMehupakh,
    TaamName::Talsha,
    TaamName::Maarikh,
    TaamName::Darga,
    TaamName::Qadma,
    TaamName::Azla,
];

/// Returns `true` if the mark is one of the [`MESHARTIM`].
#[must_use]
pub fn is_servant(name: TaamName) -> bool {
    MESHARTIM.contains(&name)
}

/// Resolves a cantillation code point to its mark name.
#[must_use]
pub const fn taam_name_of(symbol: char) -> Option<TaamName> {
    let name = match symbol {
        '\u{0591}' => TaamName::Atnah,
        '\u{0592}' => TaamName::Segolta,
        '\u{0593}' => TaamName::Shalshelet,
        '\u{0594}' => TaamName::ZaqefQaton,
        '\u{0595}' => TaamName::ZaqefGadol,
        '\u{0596}' => TaamName::Tarha,
        '\u{0597}' => TaamName::Ravia,
        '\u{0598}' | '\u{05AE}' => TaamName::Zarqa,
        '\u{0599}' => TaamName::Pashta,
        '\u{059A}' => TaamName::Yetiv,
        '\u{059B}' => TaamName::Tevir,
        '\u{059C}' => TaamName::Gerish,
        '\u{059E}' => TaamName::SheneGerishin,
        '\u{059F}' => TaamName::KarneFarah,
        '\u{05A0}' => TaamName::Tarsa,
        '\u{05A1}' => TaamName::PazerGadol,
        '\u{05A2}' | '\u{05AA}' => TaamName::YareahBenYomo,
        '\u{05A3}' => TaamName::ShofarHolekh,
        '\u{05A4}' => TaamName::ShofarMehupakh,
        '\u{05A5}' => TaamName::Maarikh,
        '\u{05A6}' => TaamName::TereTaame,
        '\u{05A7}' => TaamName::Darga,
        '\u{05A8}' => TaamName::Qadma,
        '\u{05A9}' => TaamName::Talsha,
        '\u{05BD}' => TaamName::Maamid,
        '\u{05C0}' => TaamName::Paseq,
        '\u{05C3}' => TaamName::SofPassuq,
        _ => return None,
    };
    Some(name)
}

/// Resolves a mark name to its canonical symbol.
///
/// Where two code points share a name the later table entry is canonical.
/// `tere_qadmin` is spelled as two pashtas. `azla` has no symbol.
#[must_use]
pub const fn taam_symbol_of(name: TaamName) -> Option<&'static str> {
    let symbol = match name {
        TaamName::Atnah => "\u{0591}",
        TaamName::Segolta => "\u{0592}",
        TaamName::Shalshelet => "\u{0593}",
        TaamName::ZaqefQaton => "\u{0594}",
        TaamName::ZaqefGadol => "\u{0595}",
        TaamName::Tarha => "\u{0596}",
        TaamName::Ravia => "\u{0597}",
        TaamName::Zarqa => "\u{05AE}",
        TaamName::Pashta => "\u{0599}",
        TaamName::Yetiv => "\u{059A}",
        TaamName::Tevir => "\u{059B}",
        TaamName::Gerish => "\u{059C}",
        TaamName::SheneGerishin => "\u{059E}",
        TaamName::KarneFarah => "\u{059F}",
        TaamName::Tarsa => "\u{05A0}",
        TaamName::PazerGadol => "\u{05A1}",
        TaamName::YareahBenYomo => "\u{05AA}",
        TaamName::ShofarHolekh => "\u{05A3}",
        TaamName::ShofarMehupakh => "\u{05A4}",
        TaamName::Maarikh => "\u{05A5}",
        TaamName::TereTaame => "\u{05A6}",
        TaamName::Darga => "\u{05A7}",
        TaamName::Qadma => "\u{05A8}",
        TaamName::TereQadmin => "\u{0599}\u{0599}",
        TaamName::Talsha => "\u{05A9}",
        TaamName::Maamid => "\u{05BD}",
        TaamName::Paseq => "\u{05C0}",
        TaamName::SofPassuq => "\u{05C3}",
        TaamName::Azla => return None,
    };
    Some(symbol)
}

/// Canonical names of the vowel points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NiqudName {
    /// Sheva.
    Shva,
    /// Hataf segol.
    HatafSegol,
    /// Hataf patah.
    HatafPatah,
    /// Hataf qamats.
    HatafQamats,
    /// Hiriq.
    Hiriq,
    /// Tsere.
    Tsere,
    /// Segol.
    Segol,
    /// Patah.
    Patah,
    /// Qamats.
    Qamats,
    /// Holam haser.
    HolamHaser,
    /// Qubuts.
    Qubuts,
    /// Dagesh or mappiq.
    Dagesh,
    /// Shin dot.
    ShinDot,
    /// Sin dot.
    SinDot,
    /// Upper dot.
    UpperDot,
}

impl NiqudName {
    /// Every vowel name, in table order.
    pub const ALL: [Self; 15] = [
        Self::Shva,
        Self::HatafSegol,
        Self::HatafPatah,
        Self::HatafQamats,
        Self::Hiriq,
        Self::Tsere,
        Self::Segol,
        Self::Patah,
        Self::Qamats,
        Self::HolamHaser,
        Self::Qubuts,
        Self::Dagesh,
        Self::ShinDot,
        Self::SinDot,
        Self::UpperDot,
    ];

    /// The canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shva => "shva",
            Self::HatafSegol => "hataf_segol",
            Self::HatafPatah => "hataf_patah",
            Self::HatafQamats => "hataf_qamats",
            Self::Hiriq => "hiriq",
            Self::Tsere => "tsere",
            Self::Segol => "segol",
            Self::Patah => "patah",
            Self::Qamats => "qamats",
            Self::HolamHaser => "holam_haser",
            Self::Qubuts => "qubuts",
            Self::Dagesh => "dagesh",
            Self::ShinDot => "shin_dot",
            Self::SinDot => "sin_dot",
            Self::UpperDot => "upper_dot",
        }
    }
}

impl fmt::Display for NiqudName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NiqudName {
    type Err = InvalidSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|niqud| niqud.as_str() == s)
            .ok_or_else(|| InvalidSymbolError::Name(s.to_string()))
    }
}

/// Resolves a vowel code point to its name.
#[must_use]
pub const fn niqud_name_of(symbol: char) -> Option<NiqudName> {
    let name = match symbol {
        '\u{05B0}' => NiqudName::Shva,
        '\u{05B1}' => NiqudName::HatafSegol,
        '\u{05B2}' => NiqudName::HatafPatah,
        '\u{05B3}' => NiqudName::HatafQamats,
        '\u{05B4}' => NiqudName::Hiriq,
        '\u{05B5}' => NiqudName::Tsere,
        '\u{05B6}' => NiqudName::Segol,
        '\u{05B7}' => NiqudName::Patah,
        '\u{05B8}' => NiqudName::Qamats,
        '\u{05B9}' => NiqudName::HolamHaser,
        '\u{05BB}' => NiqudName::Qubuts,
        '\u{05BC}' => NiqudName::Dagesh,
        '\u{05C1}' => NiqudName::ShinDot,
        '\u{05C2}' => NiqudName::SinDot,
        '\u{05C4}' => NiqudName::UpperDot,
        _ => return None,
    };
    Some(name)
}

/// Resolves a vowel name to its symbol.
#[must_use]
pub const fn niqud_symbol_of(name: NiqudName) -> char {
    match name {
        NiqudName::Shva => '\u{05B0}',
        NiqudName::HatafSegol => '\u{05B1}',
        NiqudName::HatafPatah => '\u{05B2}',
        NiqudName::HatafQamats => '\u{05B3}',
        NiqudName::Hiriq => '\u{05B4}',
        NiqudName::Tsere => '\u{05B5}',
        NiqudName::Segol => '\u{05B6}',
        NiqudName::Patah => '\u{05B7}',
        NiqudName::Qamats => '\u{05B8}',
        NiqudName::HolamHaser => '\u{05B9}',
        NiqudName::Qubuts => '\u{05BB}',
        NiqudName::Dagesh => '\u{05BC}',
        NiqudName::ShinDot => '\u{05C1}',
        NiqudName::SinDot => '\u{05C2}',
        NiqudName::UpperDot => '\u{05C4}',
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn taam_symbol_round_trip() {
        for name in TaamName::ALL {
            let Some(symbol) = taam_symbol_of(name) else {
                assert_eq!(name, TaamName::Azla);
                continue;
            };
            // tere_qadmin is a two-character spelling, not a single code point
            if name == TaamName::TereQadmin {
                continue;
            }
            let c = symbol.chars().next().unwrap();
            let resolved = taam_name_of(c).unwrap();
            assert_eq!(taam_symbol_of(resolved), Some(symbol), "{name}");
        }
    }

    #[test]
    fn niqud_symbol_round_trip() {
        for name in NiqudName::ALL {
            assert_eq!(niqud_name_of(niqud_symbol_of(name)), Some(name));
        }
    }

    #[test_case('\u{0598}', TaamName::Zarqa; "zarqa primary")]
    #[test_case('\u{05AE}', TaamName::Zarqa; "zarqa alternate")]
    #[test_case('\u{05A2}', TaamName::YareahBenYomo; "yareah primary")]
    #[test_case('\u{05AA}', TaamName::YareahBenYomo; "yareah alternate")]
    #[test_case('\u{05A0}', TaamName::Tarsa; "telisha gedola")]
    #[test_case('\u{05A9}', TaamName::Talsha; "telisha qetana")]
    fn shared_and_telisha_symbols(symbol: char, expected: TaamName) {
        assert_eq!(taam_name_of(symbol), Some(expected));
    }

    #[test]
    fn names_parse_from_str() {
        for name in TaamName::ALL {
            assert_eq!(name.as_str().parse::<TaamName>().unwrap(), name);
        }
        for name in NiqudName::ALL {
            assert_eq!(name.as_str().parse::<NiqudName>().unwrap(), name);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "zakef_katon".parse::<TaamName>(),
            Err(InvalidSymbolError::Name("zakef_katon".to_string()))
        );
        assert!("invalid".parse::<NiqudName>().is_err());
    }

    #[test]
    fn hebrew_names_are_unique() {
        for name in TaamName::ALL {
            assert_eq!(TaamName::from_hebrew_name(name.hebrew_name()).unwrap(), name);
        }
    }

    #[test]
    fn servant_classification() {
        assert!(is_servant(TaamName::Maarikh));
        assert!(TaamName::Azla.is_servant());
        assert!(!is_servant(TaamName::Tarha));
        assert!(!is_servant(TaamName::Pashta));
        assert!(!is_servant(TaamName::Tarsa));
    }

    #[test]
    fn maqaf_is_a_base_letter() {
        assert!(is_base_letter(MAQAF));
        assert!(is_base_letter('א'));
        assert!(!is_base_letter('\u{05B8}'));
        assert!(!is_base_letter(RLE));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&TaamName::SofPassuq).unwrap();
        assert_eq!(json, "\"sof_passuq\"");
    }
}
