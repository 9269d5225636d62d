//! Canvas, pixel math and the error taxonomy.

/// Canvas, pixel formats and geometry.
pub mod core;
/// Error taxonomy shared by every operation.
pub mod error;
pub(crate) mod math;
