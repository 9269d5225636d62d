use crate::foundation::error::{SlideError, SlideResult};

pub use kurbo::Rect;

/// Largest canvas edge the CPU rasterizer accepts.
pub const MAX_CANVAS_EDGE: u32 = u16::MAX as u32;

/// Pixel layout of a [`Canvas`] buffer. Alpha, when present, is straight (not premultiplied).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// 3 bytes per pixel, implicitly opaque.
    Rgb8,
    /// 4 bytes per pixel, straight alpha.
    Rgba8,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Return `true` when the format carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba8)
    }
}

/// Width/height pair in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Construct a size without validation; see [`CanvasSize::validate`].
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject empty sizes and sizes beyond [`MAX_CANVAS_EDGE`].
    pub fn validate(self) -> SlideResult<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(SlideError::invalid_dimensions(format!(
                "canvas {}x{} must have positive width and height",
                self.width, self.height
            )));
        }
        if self.width > MAX_CANVAS_EDGE || self.height > MAX_CANVAS_EDGE {
            return Err(SlideError::invalid_dimensions(format!(
                "canvas {}x{} exceeds the {MAX_CANVAS_EDGE}px raster limit",
                self.width, self.height
            )));
        }
        Ok(self)
    }

    fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// Immutable raster surface: tightly packed, row-major pixels in a known [`PixelFormat`].
///
/// Canvases are only created through validating constructors and never change afterwards, so a
/// caller can hold on to a background and compare it against rendered output.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    size: CanvasSize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .field("format", &self.format)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Canvas {
    /// Wrap an existing pixel buffer, validating its length against `width * height * bpp`.
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> SlideResult<Self> {
        let size = CanvasSize::new(width, height).validate()?;
        let expected = size.pixel_count().saturating_mul(format.bytes_per_pixel());
        if data.len() != expected {
            return Err(SlideError::invalid_dimensions(format!(
                "{format:?} buffer for {width}x{height} must be {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self { size, format, data })
    }

    /// Allocate a canvas with every pixel set to `rgba` (alpha dropped for [`PixelFormat::Rgb8`]).
    pub fn filled(width: u32, height: u32, format: PixelFormat, rgba: [u8; 4]) -> SlideResult<Self> {
        let size = CanvasSize::new(width, height).validate()?;
        let px = &rgba[..format.bytes_per_pixel()];
        let data = px.repeat(size.pixel_count());
        Ok(Self { size, format, data })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Canvas size.
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Pixel format of [`Canvas::data`].
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel as straight RGBA (opaque for [`PixelFormat::Rgb8`]).
    ///
    /// Returns `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let idx = ((y as usize) * (self.size.width as usize) + (x as usize)) * bpp;
        let px = &self.data[idx..idx + bpp];
        Some(match self.format {
            PixelFormat::Rgb8 => [px[0], px[1], px[2], 255],
            PixelFormat::Rgba8 => [px[0], px[1], px[2], px[3]],
        })
    }

    /// Return the pixels as straight RGBA8, expanding [`PixelFormat::Rgb8`] to opaque alpha.
    pub fn to_rgba8(&self) -> Vec<u8> {
        match self.format {
            PixelFormat::Rgba8 => self.data.clone(),
            PixelFormat::Rgb8 => {
                let mut out = Vec::with_capacity(self.size.pixel_count() * 4);
                for px in self.data.chunks_exact(3) {
                    out.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
                out
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
