//! Text metrics: the measuring/painting capability and its implementations.

/// Font-free placeholder metrics.
pub mod block_font;
/// Real fonts shaped with parley and drawn with `vello_cpu`.
pub mod fonts;
/// Measuring and painting traits.
pub mod measure;
