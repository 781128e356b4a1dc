//! Failure scenario selection.
//!
//! # Responsibilities
//! - Enumerate the behaviors the failure endpoint can exhibit
//! - Weighted per-request draw with an injectable RNG
//! - Canned malformed payload set

pub mod outcome;
pub mod payloads;

pub use outcome::{ScenarioOutcome, ScenarioTable, TableError};
