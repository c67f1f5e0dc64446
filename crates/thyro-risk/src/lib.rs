//! thyro-risk
//!
//! Static recurrence-risk scoring. Pure arithmetic over a flat record: no I/O,
//! no network, no state.

pub mod scoring;
pub mod tier;

pub use scoring::{RiskAssessment, assemble_input, score};
pub use tier::RiskTier;
