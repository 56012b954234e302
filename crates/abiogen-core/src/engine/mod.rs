//! # Engine Module
//!
//! The stateful half of the simulation: everything that consumes randomness or carries
//! configuration across trials.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Trial count, seed, chain length bounds, the viable
//!   environmental window and the stability thresholds, validated by a builder
//! - **Environment** ([`environment`]) - Uniform sampling of temperature, pH and concentration
//! - **Candidates** ([`candidate`]) - Random-length polyglycine synthesis and its structural
//!   encoding
//! - **Stability** ([`stability`]) - Descriptor-threshold filtering of parsed structures
//! - **Trials** ([`trial`]) - The per-trial pipeline and its outcome
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-level error types
//!
//! Every collaborator of a trial sits behind a trait, so [`trial::TrialRunner`] can be
//! driven with fixed samples, candidates or descriptor values.

pub mod candidate;
pub mod config;
pub mod environment;
pub mod error;
pub mod progress;
pub mod stability;
pub mod trial;
