//! Image decoding and encoding at the crate boundary.

/// Decoding backgrounds into canvases and encoding slides as PNG.
pub mod decode;
