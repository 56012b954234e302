//! # Core Module
//!
//! This module provides the stateless chemistry that the simulation engine relies on: the
//! molecular data model, the structural-encoding parser, structure descriptors and
//! residue-sequence analysis.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Elements, atoms, bonds and the molecular graph
//! - **Parsing** ([`io`]) - SMILES parsing behind the `StructureParser` trait
//! - **Structure Descriptors** ([`descriptors`]) - Molecular weight, logP and 2D layout
//! - **Sequence Analysis** ([`sequence`]) - Peptide molecular weight and isoelectric point
//!
//! Everything here is a pure function of its inputs; randomness and orchestration live in
//! the [`engine`](crate::engine).

pub mod descriptors;
pub mod io;
pub mod models;
pub mod sequence;
