/// Convenience result type used across slidesmith.
pub type SlideResult<T> = Result<T, SlideError>;

/// Top-level error taxonomy used by compositor APIs.
///
/// Overflowing text is not an error: truncation and oversized tokens are reported through
/// [`crate::TextBlock`] flags instead.
#[derive(thiserror::Error, Debug)]
pub enum SlideError {
    /// Non-positive, non-finite, or too large box / canvas dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Pixel format cannot be composited with the requested overlay.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    /// Invalid caller-provided configuration (font scale, style values, post plan).
    #[error("validation error: {0}")]
    Validation(String),

    /// Font loading, resolution, or shaping failures.
    #[error("font error: {0}")]
    Font(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideError {
    /// Build a [`SlideError::InvalidDimensions`] value.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Build a [`SlideError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`SlideError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlideError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`SlideError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
