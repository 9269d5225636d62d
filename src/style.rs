//! Colors and per-call styling.

/// Straight-alpha RGBA colors.
pub mod color;
/// Text styles, alignment and format policy.
pub mod spec;
