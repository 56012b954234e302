//! # Abiogen Core Library
//!
//! A Monte-Carlo toy model of abiogenesis: random prebiotic environments are sampled, the
//! few that fall inside a narrow viable window synthesize a polyglycine candidate, and the
//! candidate survives only if simple structural descriptors call it stable.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Stateless chemistry: the molecular graph, a SMILES parser,
//!   structure descriptors (weight, logP, 2D layout) and residue-sequence analysis.
//!
//! - **[`engine`]: The Logic Core.** Configuration, environment sampling, candidate
//!   synthesis, stability filtering and the per-trial pipeline.
//!
//! - **[`workflows`]: The Public API.** [`workflows::simulate::run`] seeds the random number
//!   generator from a configuration and produces a success-rate report.

pub mod core;
pub mod engine;
pub mod workflows;
