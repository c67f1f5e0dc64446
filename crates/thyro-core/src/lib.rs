//! thyro-core
//!
//! Pure domain types for the thyroid follow-up form: clinical feature names,
//! patient and appointment records, prediction wire types and derived-age
//! arithmetic. No HTTP or rendering dependency — this is the shared
//! vocabulary of the Thyro system.

pub mod age;
pub mod error;
pub mod features;
pub mod models;
