use super::SequenceError;
use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;

/// Single-letter code of glycine, the residue the simulated polymers are built from.
pub const GLYCINE: char = 'G';

/// Average masses of the free amino acids in g/mol, keyed by single-letter code.
pub(crate) static FREE_AMINO_ACID_WEIGHTS: Map<char, f64> = phf_map! {
    'A' => 89.0932,
    'C' => 121.1582,
    'D' => 133.1027,
    'E' => 147.1293,
    'F' => 165.1891,
    'G' => 75.0666,
    'H' => 155.1546,
    'I' => 131.1729,
    'K' => 146.1876,
    'L' => 131.1729,
    'M' => 149.2113,
    'N' => 132.1179,
    'O' => 255.3134,
    'P' => 115.1305,
    'Q' => 146.1445,
    'R' => 174.2010,
    'S' => 105.0926,
    'T' => 119.1192,
    'U' => 168.0532,
    'V' => 117.1463,
    'W' => 204.2252,
    'Y' => 181.1885,
};

/// A validated sequence of single-letter amino-acid residue codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueSequence(String);

impl ResidueSequence {
    /// Validates `codes` as a non-empty run of known residue codes.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Empty`] for an empty string and
    /// [`SequenceError::UnknownResidue`] for the first unrecognised code.
    pub fn new(codes: &str) -> Result<Self, SequenceError> {
        if codes.is_empty() {
            return Err(SequenceError::Empty);
        }
        if let Some((position, code)) = codes
            .chars()
            .enumerate()
            .find(|(_, code)| !FREE_AMINO_ACID_WEIGHTS.contains_key(code))
        {
            return Err(SequenceError::UnknownResidue { code, position });
        }
        Ok(Self(codes.to_string()))
    }

    /// Builds a sequence of `length` copies of one residue code.
    pub fn homopolymer(code: char, length: usize) -> Result<Self, SequenceError> {
        Self::new(&code.to_string().repeat(length))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<char> {
        self.0.chars().next()
    }

    pub fn last(&self) -> Option<char> {
        self.0.chars().next_back()
    }

    pub fn residues(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }
}

impl FromStr for ResidueSequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ResidueSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
