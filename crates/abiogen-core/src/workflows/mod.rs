//! # Workflows Module
//!
//! Top-level entry points that tie the `engine` and `core` layers together.
//!
//! - **Simulation Workflow** ([`simulate`]) - Runs the seeded Monte-Carlo experiment and
//!   produces a [`simulate::SimulationReport`].

pub mod simulate;
