//! Branded slides and whole posts built on the layout engine and renderer.

/// Brand kit, style hints and post plans.
pub mod brand;
/// Whole-post rendering, sequential or on a rayon pool.
pub mod post;
/// Headline and overlay slide composition.
pub mod slides;
