use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Canvas, PixelFormat};
use crate::foundation::error::SlideResult;

/// Decode PNG/JPEG/... bytes into a [`Canvas`].
///
/// Images with an alpha channel become [`PixelFormat::Rgba8`] (straight alpha), all others
/// [`PixelFormat::Rgb8`].
pub fn decode_canvas(bytes: &[u8]) -> SlideResult<Canvas> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    if dyn_img.color().has_alpha() {
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Canvas::from_raw(width, height, PixelFormat::Rgba8, rgba.into_raw())
    } else {
        let rgb = dyn_img.to_rgb8();
        let (width, height) = rgb.dimensions();
        Canvas::from_raw(width, height, PixelFormat::Rgb8, rgb.into_raw())
    }
}

/// Read and decode an image file.
pub fn load_canvas(path: impl AsRef<Path>) -> SlideResult<Canvas> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read image file '{}'", path.display()))?;
    decode_canvas(&bytes)
}

/// Encode `canvas` as PNG, keeping its pixel format.
pub fn encode_png(canvas: &Canvas) -> SlideResult<Vec<u8>> {
    let color = match canvas.format() {
        PixelFormat::Rgb8 => image::ExtendedColorType::Rgb8,
        PixelFormat::Rgba8 => image::ExtendedColorType::Rgba8,
    };
    let mut buf = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut buf),
        canvas.data(),
        canvas.width(),
        canvas.height(),
        color,
        image::ImageFormat::Png,
    )
    .context("encode png")?;
    Ok(buf)
}
