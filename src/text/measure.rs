use crate::foundation::error::SlideResult;
use crate::style::color::Rgba8;
use crate::style::spec::FontSpec;

/// Deterministic glyph-advance measurement.
///
/// The same font data, text, and size must always produce the same width. Implementations are
/// shared across render threads, so they must tolerate concurrent calls.
pub trait TextMeasure: Send + Sync {
    /// Advance width of `text` on a single line, in pixels.
    fn measure(&self, text: &str, font: &FontSpec, size_px: f32) -> SlideResult<f32>;
}

/// One line of text to draw, positioned by the top-left corner of its line box.
#[derive(Clone, Copy, Debug)]
pub struct LinePaint<'a> {
    /// Line contents.
    pub text: &'a str,
    /// Font to draw with; must be the font the line was measured with.
    pub font: &'a FontSpec,
    /// Font size in pixels.
    pub size_px: f32,
    /// Left edge of the line.
    pub x: f64,
    /// Top edge of the line box.
    pub top: f64,
    /// Height of the line box (font size times leading).
    pub line_height: f64,
    /// Glyph color.
    pub color: Rgba8,
}

/// A [`TextMeasure`] that can also rasterize what it measured.
///
/// Keeping both behind one implementation is what lets drawn text line up with the widths the
/// layout engine planned with.
pub trait TextPainter: TextMeasure {
    /// Queue the glyphs of `line` into `ctx`.
    fn paint_line(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        line: &LinePaint<'_>,
    ) -> SlideResult<()>;
}
