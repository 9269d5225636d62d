use crate::foundation::error::{SlideError, SlideResult};
use crate::style::spec::FontSpec;
use crate::text::measure::{LinePaint, TextMeasure, TextPainter};

/// Placeholder metrics: every character advances by `advance_ratio * size`, and every
/// non-whitespace character is drawn as a solid box.
///
/// Needs no font files and ignores the requested family and weight. Used for previews and as
/// the reference metrics in tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockFont {
    /// Advance per character as a fraction of the font size.
    pub advance_ratio: f32,
}

impl Default for BlockFont {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl BlockFont {
    /// Block font with a custom advance ratio.
    pub fn with_advance_ratio(advance_ratio: f32) -> SlideResult<Self> {
        if !advance_ratio.is_finite() || advance_ratio <= 0.0 {
            return Err(SlideError::validation(
                "block font advance_ratio must be finite and > 0",
            ));
        }
        Ok(Self { advance_ratio })
    }

    fn advance(&self, size_px: f32) -> f32 {
        size_px * self.advance_ratio
    }
}

impl TextMeasure for BlockFont {
    fn measure(&self, text: &str, _font: &FontSpec, size_px: f32) -> SlideResult<f32> {
        Ok(text.chars().count() as f32 * self.advance(size_px))
    }
}

impl TextPainter for BlockFont {
    fn paint_line(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        line: &LinePaint<'_>,
    ) -> SlideResult<()> {
        let adv = f64::from(self.advance(line.size_px));
        let size = f64::from(line.size_px);
        let glyph_top = line.top + (line.line_height - size) / 2.0 + size * 0.15;
        let glyph_bottom = glyph_top + size * 0.75;

        let c = line.color;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        for (i, ch) in line.text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x0 = line.x + (i as f64) * adv + adv * 0.1;
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                x0,
                glyph_top,
                x0 + adv * 0.8,
                glyph_bottom,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/block_font.rs"]
mod tests;
