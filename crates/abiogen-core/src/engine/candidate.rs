use super::config::ChainLength;
use crate::core::sequence::residue::GLYCINE;
use rand::{Rng, RngCore};

const GLYCINE_UNIT: &str = "NCC(=O)";
const AMIDE_CAP: &str = "N";

/// A synthesized chain: its one-letter residue sequence and a structural encoding to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub residues: String,
    pub encoding: String,
}

impl Candidate {
    pub fn length(&self) -> usize {
        self.residues.chars().count()
    }
}

pub trait CandidateBuilder {
    fn build(&self, rng: &mut dyn RngCore) -> Candidate;
}

#[derive(Debug, Clone, Copy)]
pub struct PolyglycineBuilder {
    min_length: usize,
    max_length: usize,
}

impl Default for PolyglycineBuilder {
    fn default() -> Self {
        Self::new(ChainLength::default())
    }
}

impl PolyglycineBuilder {
    pub fn new(chain_length: ChainLength) -> Self {
        let min_length = chain_length.min.max(1);
        Self {
            min_length,
            max_length: chain_length.max.max(min_length),
        }
    }
}

impl CandidateBuilder for PolyglycineBuilder {
    fn build(&self, rng: &mut dyn RngCore) -> Candidate {
        let length = rng.gen_range(self.min_length..=self.max_length);
        Candidate {
            residues: GLYCINE.to_string().repeat(length),
            encoding: polyglycine_encoding(length),
        }
    }
}

/// Repeats the glycine unit, strips trailing hydroxyl `O`s, then caps the chain with an amide `N`.
pub fn polyglycine_encoding(length: usize) -> String {
    let mut encoding = GLYCINE_UNIT.repeat(length);
    let trimmed = encoding.trim_end_matches('O').len();
    encoding.truncate(trimmed);
    encoding.push_str(AMIDE_CAP);
    encoding
}
