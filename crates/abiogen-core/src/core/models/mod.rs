//! # Core Models Module
//!
//! This module contains the data structures used to represent parsed molecular structures
//! in Abiogen.
//!
//! ## Key Components
//!
//! - [`element`] - Chemical elements with atomic weights and default valences
//! - [`atom`] - Individual atom representation with charge, hydrogens and 2D position
//! - [`topology`] - Bond orders and bonds
//! - [`molecule`] - The molecular graph produced by the structure parser
//! - [`ids`] - Unique identifier types for atoms
//!
//! ## Usage
//!
//! ```ignore
//! use abiogen::core::models::{atom::Atom, element::Element, molecule::Molecule};
//! use abiogen::core::models::topology::BondOrder;
//!
//! let mut molecule = Molecule::new();
//! let c = molecule.add_atom(Atom::new(Element::C, false));
//! let o = molecule.add_atom(Atom::new(Element::O, false));
//! molecule.add_bond(c, o, BondOrder::Double);
//! ```

pub mod atom;
pub mod element;
pub mod ids;
pub mod molecule;
pub mod topology;
