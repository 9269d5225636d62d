use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, CanvasSize, PixelFormat, Rect};
use crate::foundation::error::{SlideError, SlideResult};
use crate::layout::engine::{LayoutBox, TextBlock};
use crate::render::raster::{Surface, fill_rect, snap_to_pixels};
use crate::style::color::Rgba8;
use crate::style::spec::{Alignment, FormatPolicy, StyleSpec};
use crate::text::measure::{LinePaint, TextPainter};

/// What a slide is drawn on.
#[derive(Clone, Copy, Debug)]
pub enum Backdrop<'a> {
    /// Fresh canvas of this size filled with the style's background color.
    Solid(CanvasSize),
    /// Copy of a supplied image. The image itself is never modified.
    Image(&'a Canvas),
}

/// Vertical placement of a text block inside its anchor box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    /// Block starts at the top edge.
    #[default]
    Top,
    /// Block is centered.
    Center,
    /// Block ends at the bottom edge.
    Bottom,
}

/// Where on the canvas a text block is placed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxAnchor {
    /// Box in canvas pixels; its size is normally the [`LayoutBox`] the block was fitted to.
    pub rect: Rect,
    /// Vertical placement inside `rect`.
    #[serde(default)]
    pub vertical: VerticalAlign,
}

impl BoxAnchor {
    /// Anchor at `rect`.
    pub fn new(rect: Rect, vertical: VerticalAlign) -> Self {
        Self { rect, vertical }
    }

    /// Layout box with the anchor's size.
    pub fn layout_box(&self) -> LayoutBox {
        LayoutBox::new(self.rect.width() as f32, self.rect.height() as f32)
    }

    /// Reject empty, inverted, or non-finite boxes.
    pub fn validate(&self) -> SlideResult<()> {
        let r = self.rect;
        let finite = [r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite());
        if !finite || r.width() <= 0.0 || r.height() <= 0.0 {
            return Err(SlideError::invalid_dimensions(format!(
                "text box ({}, {})-({}, {}) must have positive width and height",
                r.x0, r.y0, r.x1, r.y1
            )));
        }
        Ok(())
    }

    /// Top-left corner of each line box of `block`, in canvas pixels.
    pub fn line_origins(&self, block: &TextBlock, alignment: Alignment) -> Vec<(f64, f64)> {
        let total = f64::from(block.total_height());
        let free = self.rect.height() - total;
        let y0 = self.rect.y0
            + match self.vertical {
                VerticalAlign::Top => 0.0,
                VerticalAlign::Center => free / 2.0,
                VerticalAlign::Bottom => free,
            };
        let lh = f64::from(block.line_height);
        block
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let x = self.rect.x0 + alignment.offset(self.rect.width(), f64::from(line.width));
                (x, y0 + (i as f64) * lh)
            })
            .collect()
    }

    /// Bounding box of the drawn (non-empty) lines of `block`.
    pub fn text_extent(&self, block: &TextBlock, alignment: Alignment) -> Option<Rect> {
        let lh = f64::from(block.line_height);
        block
            .lines
            .iter()
            .zip(self.line_origins(block, alignment))
            .filter(|(line, _)| !line.text.is_empty())
            .map(|(line, (x, top))| Rect::new(x, top, x + f64::from(line.width), top + lh))
            .reduce(|a, b| a.union(b))
    }
}

/// A solid (possibly translucent) rectangle drawn before any text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Panel {
    /// Area in canvas pixels; snapped to whole pixels and clipped to the canvas.
    pub rect: Rect,
    /// Fill color; alpha below 255 makes it a scrim.
    pub color: Rgba8,
}

/// A fitted text block with its style and placement.
#[derive(Clone, Copy, Debug)]
pub struct TextLayer<'a> {
    /// Lines to draw.
    pub block: &'a TextBlock,
    /// Color and alignment source.
    pub style: &'a StyleSpec,
    /// Placement on the canvas.
    pub anchor: BoxAnchor,
}

/// Everything drawn on top of a backdrop: panels first, then text layers in order.
#[derive(Clone, Debug)]
pub struct SlideScene<'a> {
    /// Fill for [`Backdrop::Solid`].
    pub background_color: Rgba8,
    /// Panels (scrims, badges).
    pub panels: Vec<Panel>,
    /// Text layers.
    pub layers: Vec<TextLayer<'a>>,
    /// Handling of RGB image backdrops under translucent panels.
    pub format_policy: FormatPolicy,
}

/// Render one text block over `backdrop`.
///
/// On an image backdrop with `style.scrim_opacity > 0`, a panel of `style.accent_color` at that
/// opacity is placed under the drawn text, grown by `style.scrim_padding_px`.
pub fn render(
    backdrop: Backdrop<'_>,
    text_block: &TextBlock,
    style: &StyleSpec,
    box_anchor: BoxAnchor,
    painter: &dyn TextPainter,
) -> SlideResult<Canvas> {
    box_anchor.validate()?;
    style.validate()?;

    let scrim_requested = matches!(backdrop, Backdrop::Image(_)) && style.scrim_opacity > 0.0;
    if scrim_requested {
        output_format(backdrop, style.background_color, true, style.format_policy)?;
    }

    let mut panels = Vec::new();
    if scrim_requested
        && let Some(extent) = box_anchor.text_extent(text_block, style.alignment)
    {
        panels.push(Panel {
            rect: extent.inflate(
                f64::from(style.scrim_padding_px),
                f64::from(style.scrim_padding_px),
            ),
            color: style.accent_color.with_opacity(style.scrim_opacity),
        });
    }

    let scene = SlideScene {
        background_color: style.background_color,
        panels,
        layers: vec![TextLayer {
            block: text_block,
            style,
            anchor: box_anchor,
        }],
        format_policy: style.format_policy,
    };
    render_scene(backdrop, &scene, painter)
}

/// Render a full scene over `backdrop`. Pure: identical inputs give identical pixels.
#[tracing::instrument(
    level = "debug",
    skip(backdrop, scene, painter),
    fields(panels = scene.panels.len(), layers = scene.layers.len())
)]
pub fn render_scene(
    backdrop: Backdrop<'_>,
    scene: &SlideScene<'_>,
    painter: &dyn TextPainter,
) -> SlideResult<Canvas> {
    for layer in &scene.layers {
        layer.anchor.validate()?;
    }
    let needs_alpha = scene.panels.iter().any(|p| p.color.a < 255);
    let format = output_format(
        backdrop,
        scene.background_color,
        needs_alpha,
        scene.format_policy,
    )?;

    let mut surface = match backdrop {
        Backdrop::Solid(size) => Surface::solid(size, scene.background_color)?,
        Backdrop::Image(canvas) => Surface::from_canvas(canvas),
    };
    let bounds = surface.bounds();

    let has_ink = !scene.panels.is_empty() || scene.layers.iter().any(|l| !l.block.is_empty());
    if has_ink {
        surface.draw_over(|ctx| {
            for panel in &scene.panels {
                if let Some(rect) = snap_to_pixels(panel.rect, bounds) {
                    fill_rect(ctx, rect, panel.color);
                }
            }
            for layer in &scene.layers {
                let block = layer.block;
                let origins = layer.anchor.line_origins(block, layer.style.alignment);
                for (line, (x, top)) in block.lines.iter().zip(origins) {
                    if line.text.is_empty() {
                        continue;
                    }
                    painter.paint_line(
                        ctx,
                        &LinePaint {
                            text: &line.text,
                            font: &block.font,
                            size_px: block.font_size,
                            x,
                            top,
                            line_height: f64::from(block.line_height),
                            color: layer.style.text_color,
                        },
                    )?;
                }
            }
            Ok(())
        })?;
    }

    tracing::debug!(
        width = surface.size.width,
        height = surface.size.height,
        ?format,
        "slide rendered"
    );
    surface.into_canvas(format)
}

/// Output format for `backdrop`, applying `policy` when translucent ink meets an RGB image.
fn output_format(
    backdrop: Backdrop<'_>,
    background_color: Rgba8,
    needs_alpha: bool,
    policy: FormatPolicy,
) -> SlideResult<PixelFormat> {
    match backdrop {
        Backdrop::Solid(_) if background_color.a == 255 => Ok(PixelFormat::Rgb8),
        Backdrop::Solid(_) => Ok(PixelFormat::Rgba8),
        Backdrop::Image(c) if c.format().has_alpha() => Ok(PixelFormat::Rgba8),
        Backdrop::Image(c) => match (needs_alpha, policy) {
            (false, _) => Ok(PixelFormat::Rgb8),
            (true, FormatPolicy::Upgrade) => Ok(PixelFormat::Rgba8),
            (true, FormatPolicy::Reject) => Err(SlideError::unsupported_format(format!(
                "{}x{} Rgb8 background has no alpha channel for a translucent scrim",
                c.width(),
                c.height()
            ))),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/slide.rs"]
mod tests;
