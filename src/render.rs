//! Slide rasterization on `vello_cpu`.

pub(crate) mod raster;
/// Backdrops, text anchoring and the slide renderer.
pub mod slide;
