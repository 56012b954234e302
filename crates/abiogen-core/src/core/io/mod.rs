//! Provides parsers for linear structural encodings.
//!
//! The simulation builds candidate molecules as SMILES strings; [`smiles`] turns them into
//! [`Molecule`](crate::core::models::molecule::Molecule) graphs behind the
//! [`traits::StructureParser`] interface.

pub mod smiles;
pub mod traits;
