use std::{path::Path, sync::Mutex};

use anyhow::Context;

use crate::foundation::error::{SlideError, SlideResult};
use crate::style::spec::FontSpec;
use crate::text::measure::{LinePaint, TextMeasure, TextPainter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

struct Shaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Shaper {
    fn shape(
        &mut self,
        family: &str,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_owned())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        layout
    }
}

struct LoadedFace {
    family: String,
    weight: u16,
    data: vello_cpu::peniko::FontData,
    // Each face shapes in a private context that only knows this face, so the glyph ids Parley
    // produces always index into `data`.
    shaper: Mutex<Shaper>,
}

impl LoadedFace {
    fn shape(
        &self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> SlideResult<parley::Layout<TextBrushRgba8>> {
        let mut shaper = self
            .shaper
            .lock()
            .map_err(|_| SlideError::font(format!("shaper for '{}' is poisoned", self.family)))?;
        Ok(shaper.shape(&self.family, text, size_px, brush))
    }
}

/// Fonts loaded once up front and shared read-only by every layout and render call.
///
/// Faces are selected by family name (case-insensitive) and the nearest registered weight.
/// Shaping goes through Parley; drawing goes through `vello_cpu` glyph runs built from the same
/// shaped layout, so measured and drawn advances agree.
#[derive(Default)]
pub struct FontBook {
    faces: Vec<LoadedFace>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.faces.iter().map(|face| (&face.family, face.weight)))
            .finish()
    }
}

impl FontBook {
    /// Empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a TrueType/OpenType face from memory under `weight`.
    ///
    /// Returns the family name detected from the font data.
    pub fn add_font(&mut self, font_bytes: Vec<u8>, weight: u16) -> SlideResult<String> {
        if !(1..=1000).contains(&weight) {
            return Err(SlideError::validation(format!(
                "font weight must be in 1..=1000, got {weight}"
            )));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SlideError::font("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SlideError::font("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        tracing::debug!(family = %family, weight, "registered font face");
        self.faces.push(LoadedFace {
            family: family.clone(),
            weight,
            data,
            shaper: Mutex::new(Shaper {
                font_ctx,
                layout_ctx: parley::LayoutContext::new(),
            }),
        });
        Ok(family)
    }

    /// Read a font file and register it; see [`FontBook::add_font`].
    pub fn load_font_file(&mut self, path: impl AsRef<Path>, weight: u16) -> SlideResult<String> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        self.add_font(bytes, weight)
    }

    /// Registered `(family, weight)` pairs in registration order.
    pub fn faces(&self) -> impl Iterator<Item = (&str, u16)> {
        self.faces.iter().map(|f| (f.family.as_str(), f.weight))
    }

    /// Return `true` when no face is registered.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    fn resolve(&self, font: &FontSpec) -> SlideResult<&LoadedFace> {
        self.faces
            .iter()
            .filter(|f| f.family.eq_ignore_ascii_case(font.family.trim()))
            .min_by_key(|f| (f.weight.abs_diff(font.weight), std::cmp::Reverse(f.weight)))
            .ok_or_else(|| {
                SlideError::font(format!(
                    "no face registered for family '{}' (weight {})",
                    font.family, font.weight
                ))
            })
    }
}

impl TextMeasure for FontBook {
    fn measure(&self, text: &str, font: &FontSpec, size_px: f32) -> SlideResult<f32> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SlideError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self
            .resolve(font)?
            .shape(text, size_px, TextBrushRgba8::default())?;
        Ok(layout.width())
    }
}

impl TextPainter for FontBook {
    fn paint_line(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        line: &LinePaint<'_>,
    ) -> SlideResult<()> {
        if line.text.is_empty() {
            return Ok(());
        }
        let face = self.resolve(line.font)?;
        let c = line.color;
        let brush = TextBrushRgba8 {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        };
        let layout = face.shape(line.text, line.size_px, brush)?;

        // Center the font's natural line inside the leading-expanded line box.
        let y_shift = (line.line_height - f64::from(layout.height())) / 2.0;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            line.x,
            line.top + y_shift,
        )));
        for layout_line in layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let brush = glyph_run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let glyphs = glyph_run
                    .glyphs()
                    .map(|g| {
                        let out = vello_cpu::Glyph {
                            id: g.id,
                            x: x + g.x,
                            y: y - g.y,
                        };
                        x += g.advance;
                        out
                    })
                    .collect::<Vec<_>>();
                ctx.glyph_run(&face.data)
                    .font_size(glyph_run.run().font_size())
                    .fill_glyphs(glyphs.into_iter());
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
