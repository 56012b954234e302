use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Chemical elements recognised by the structure parser and the descriptor calculators.
///
/// The set covers the SMILES organic subset plus the common counter-ions and trace elements
/// that appear in bracket atoms of small prebiotic molecules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    H,
    B,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    Si,
    P,
    S,
    Cl,
    K,
    Ca,
    Fe,
    Zn,
    Se,
    Br,
    I,
}

static SYMBOLS: Map<&'static str, Element> = phf_map! {
    "H" => Element::H,
    "B" => Element::B,
    "C" => Element::C,
    "N" => Element::N,
    "O" => Element::O,
    "F" => Element::F,
    "Na" => Element::Na,
    "Mg" => Element::Mg,
    "Si" => Element::Si,
    "P" => Element::P,
    "S" => Element::S,
    "Cl" => Element::Cl,
    "K" => Element::K,
    "Ca" => Element::Ca,
    "Fe" => Element::Fe,
    "Zn" => Element::Zn,
    "Se" => Element::Se,
    "Br" => Element::Br,
    "I" => Element::I,
};

impl Element {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        SYMBOLS.get(symbol).copied()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::B => "B",
            Self::C => "C",
            Self::N => "N",
            Self::O => "O",
            Self::F => "F",
            Self::Na => "Na",
            Self::Mg => "Mg",
            Self::Si => "Si",
            Self::P => "P",
            Self::S => "S",
            Self::Cl => "Cl",
            Self::K => "K",
            Self::Ca => "Ca",
            Self::Fe => "Fe",
            Self::Zn => "Zn",
            Self::Se => "Se",
            Self::Br => "Br",
            Self::I => "I",
        }
    }

    pub fn atomic_number(self) -> u8 {
        match self {
            Self::H => 1,
            Self::B => 5,
            Self::C => 6,
            Self::N => 7,
            Self::O => 8,
            Self::F => 9,
            Self::Na => 11,
            Self::Mg => 12,
            Self::Si => 14,
            Self::P => 15,
            Self::S => 16,
            Self::Cl => 17,
            Self::K => 19,
            Self::Ca => 20,
            Self::Fe => 26,
            Self::Zn => 30,
            Self::Se => 34,
            Self::Br => 35,
            Self::I => 53,
        }
    }

    /// Standard atomic weight in g/mol (IUPAC conventional values).
    pub fn average_mass(self) -> f64 {
        match self {
            Self::H => 1.008,
            Self::B => 10.812,
            Self::C => 12.011,
            Self::N => 14.007,
            Self::O => 15.999,
            Self::F => 18.998,
            Self::Na => 22.990,
            Self::Mg => 24.305,
            Self::Si => 28.086,
            Self::P => 30.974,
            Self::S => 32.067,
            Self::Cl => 35.453,
            Self::K => 39.098,
            Self::Ca => 40.078,
            Self::Fe => 55.845,
            Self::Zn => 65.390,
            Self::Se => 78.960,
            Self::Br => 79.904,
            Self::I => 126.904,
        }
    }

    /// Allowed valences for implicit-hydrogen assignment, smallest first.
    ///
    /// Only meaningful for organic-subset atoms; everything else returns an empty slice and
    /// must carry its hydrogen count explicitly.
    pub fn default_valences(self) -> &'static [u8] {
        match self {
            Self::B => &[3],
            Self::C => &[4],
            Self::N => &[3, 5],
            Self::O => &[2],
            Self::P => &[3, 5],
            Self::S => &[2, 4, 6],
            Self::F | Self::Cl | Self::Br | Self::I => &[1],
            _ => &[],
        }
    }

    pub fn is_organic_subset(self) -> bool {
        !self.default_valences().is_empty()
    }

    pub fn is_halogen(self) -> bool {
        matches!(self, Self::F | Self::Cl | Self::Br | Self::I)
    }

    /// Heteroatoms in the Crippen sense: anything bonded into organic frameworks that is
    /// neither carbon nor hydrogen.
    pub fn is_heteroatom(self) -> bool {
        matches!(
            self,
            Self::N
                | Self::O
                | Self::P
                | Self::S
                | Self::Se
                | Self::F
                | Self::Cl
                | Self::Br
                | Self::I
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol '{0}'")]
pub struct ParseElementError(pub String);

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| ParseElementError(s.to_string()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
