//! # Structure Descriptors
//!
//! Scalar properties computed over a parsed [`Molecule`]: average molecular weight
//! ([`weight`]), a Wildman–Crippen style octanol/water partition coefficient
//! ([`crippen`]) and a 2D depiction layout ([`layout`]).
//!
//! The simulation consumes these through the [`DescriptorService`] trait so that trials can
//! be driven with fixed descriptor values in tests.

pub mod crippen;
pub mod layout;
pub mod weight;

use crate::core::models::molecule::Molecule;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DescriptorError {
    #[error("Cannot compute descriptors for an empty molecule")]
    EmptyMolecule,

    #[error("No {descriptor} contribution is defined for element {symbol}")]
    UnsupportedElement {
        descriptor: &'static str,
        symbol: &'static str,
    },

    #[error("Descriptor '{descriptor}' evaluated to a non-finite value ({value})")]
    NonFinite { descriptor: &'static str, value: f64 },
}

/// Structure-level descriptor calculations consumed by the stability filter.
pub trait DescriptorService {
    /// Average molecular weight in g/mol, including implicit hydrogens.
    fn molecular_weight(&self, molecule: &Molecule) -> Result<f64, DescriptorError>;

    /// Estimated octanol/water partition coefficient (logP).
    fn log_p(&self, molecule: &Molecule) -> Result<f64, DescriptorError>;

    /// Assigns 2D depiction coordinates to every atom of the molecule.
    fn compute_2d_layout(&self, molecule: &mut Molecule) -> Result<(), DescriptorError>;
}

/// The descriptor implementations shipped with this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDescriptors;

impl DescriptorService for StandardDescriptors {
    fn molecular_weight(&self, molecule: &Molecule) -> Result<f64, DescriptorError> {
        finite("molecular weight", weight::average_molecular_weight(molecule)?)
    }

    fn log_p(&self, molecule: &Molecule) -> Result<f64, DescriptorError> {
        finite("logP", crippen::log_p(molecule)?)
    }

    fn compute_2d_layout(&self, molecule: &mut Molecule) -> Result<(), DescriptorError> {
        layout::compute_2d_coords(molecule)
    }
}

fn finite(descriptor: &'static str, value: f64) -> Result<f64, DescriptorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DescriptorError::NonFinite { descriptor, value })
    }
}
