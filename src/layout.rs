//! Fitting text into a box.

/// Wrapping, candidate-size fitting and ellipsis truncation.
pub mod engine;
