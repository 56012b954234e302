//! # Sequence Analysis
//!
//! Residue-sequence level properties of a candidate peptide: average molecular weight and
//! isoelectric point ([`protparam`]) over a validated [`residue::ResidueSequence`].

pub mod protparam;
pub mod residue;

use residue::ResidueSequence;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Residue sequence is empty")]
    Empty,

    #[error("Unknown residue code '{code}' at position {position}")]
    UnknownResidue { code: char, position: usize },
}

/// Sequence-level descriptors reported for a successful candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceProperties {
    pub length: usize,
    pub molecular_weight: f64,
    pub isoelectric_point: f64,
}

/// Computes sequence-level descriptors from a string of residue codes.
pub trait SequenceAnalyzer {
    /// # Errors
    ///
    /// Returns a [`SequenceError`] if `residues` is not a valid residue sequence.
    fn analyze(&self, residues: &str) -> Result<SequenceProperties, SequenceError>;
}

/// Average-mass and pKa-table analysis in the style of the ExPASy ProtParam tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtParamAnalyzer;

impl SequenceAnalyzer for ProtParamAnalyzer {
    fn analyze(&self, residues: &str) -> Result<SequenceProperties, SequenceError> {
        let sequence = ResidueSequence::new(residues)?;
        Ok(SequenceProperties {
            length: sequence.len(),
            molecular_weight: protparam::molecular_weight(&sequence),
            isoelectric_point: protparam::isoelectric_point(&sequence),
        })
    }
}
