//! Time-series utilities shared by providers and the orchestrator.
//!
//! Modules include:
//! - `normalize`: turn raw exchange rows into a clean, ordered series
//! - `align`: inner-join two series on exact timestamps
//! - `ratio`: divide aligned closes, excluding undefined points
/// Inner join of two series.
pub mod align;
/// Raw row parsing and series normalization.
pub mod normalize;
/// Ratio computation over an aligned pair.
pub mod ratio;
