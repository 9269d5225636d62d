use crate::foundation::core::{Canvas, CanvasSize, PixelFormat, Rect};
use crate::foundation::error::{SlideError, SlideResult};
use crate::foundation::math::over_straight_in_place;
use crate::style::color::Rgba8;

fn size_u16(size: CanvasSize) -> SlideResult<(u16, u16)> {
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| SlideError::invalid_dimensions("pixmap width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| SlideError::invalid_dimensions("pixmap height exceeds u16"))?;
    Ok((w, h))
}

/// Straight-alpha RGBA8 working buffer every slide is composed in.
pub(crate) struct Surface {
    pub(crate) size: CanvasSize,
    pub(crate) rgba8: Vec<u8>,
}

impl Surface {
    pub(crate) fn solid(size: CanvasSize, color: Rgba8) -> SlideResult<Self> {
        let size = size.validate()?;
        let rgba8 = color
            .to_array()
            .repeat((size.width as usize) * (size.height as usize));
        Ok(Self { size, rgba8 })
    }

    /// Copy of `canvas`; the source buffer is never touched again.
    pub(crate) fn from_canvas(canvas: &Canvas) -> Self {
        Self {
            size: canvas.size(),
            rgba8: canvas.to_rgba8(),
        }
    }

    pub(crate) fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f64::from(self.size.width),
            f64::from(self.size.height),
        )
    }

    /// Rasterize `draw` with `vello_cpu` into a transparent layer and composite it over `self`.
    ///
    /// `vello_cpu` renders into a fresh premultiplied buffer, so the layer is built separately
    /// and then blended; pixels the layer leaves transparent keep their exact previous value.
    pub(crate) fn draw_over(
        &mut self,
        draw: impl FnOnce(&mut vello_cpu::RenderContext) -> SlideResult<()>,
    ) -> SlideResult<()> {
        let (w, h) = size_u16(self.size)?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        draw(&mut ctx)?;
        ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);
        over_straight_in_place(&mut self.rgba8, layer.data_as_u8_slice())
    }

    pub(crate) fn into_canvas(self, format: PixelFormat) -> SlideResult<Canvas> {
        let data = match format {
            PixelFormat::Rgba8 => self.rgba8,
            PixelFormat::Rgb8 => self
                .rgba8
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        };
        Canvas::from_raw(self.size.width, self.size.height, format, data)
    }
}

pub(crate) fn fill_rect(ctx: &mut vello_cpu::RenderContext, rect: Rect, color: Rgba8) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
}

/// Round to whole pixels and clip to `bounds`; `None` when nothing is left.
pub(crate) fn snap_to_pixels(rect: Rect, bounds: Rect) -> Option<Rect> {
    let snapped = Rect::new(
        rect.x0.round(),
        rect.y0.round(),
        rect.x1.round(),
        rect.y1.round(),
    )
    .intersect(bounds);
    (snapped.width() > 0.0 && snapped.height() > 0.0).then_some(snapped)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
