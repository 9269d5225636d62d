use crate::compose::brand::{BrandKit, SlideContent};
use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::SlideResult;
use crate::layout::engine::{LayoutBox, TextBlock, layout};
use crate::render::slide::{
    Backdrop, BoxAnchor, Panel, SlideScene, TextLayer, VerticalAlign, render_scene,
};
use crate::style::spec::StyleSpec;
use crate::text::measure::TextPainter;

/// One rendered image of a post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    /// Position in the post; the headline is `0`.
    pub index: usize,
    /// `true` for the text-only branded slide.
    pub is_headline: bool,
    /// Pixels.
    pub canvas: Canvas,
}

/// Smaller sizes tried after `start` for badge and footer labels.
fn label_scale(start: f32) -> Vec<f32> {
    [1.0, 0.85, 0.7, 0.55]
        .iter()
        .map(|k| start * k)
        .collect()
}

/// Render the branded, text-only first slide of a post.
#[tracing::instrument(level = "debug", skip(headline, brand, painter), fields(text_len = headline.len()))]
pub fn compose_headline(
    headline: &str,
    brand: &BrandKit,
    painter: &dyn TextPainter,
) -> SlideResult<Slide> {
    brand.validate()?;
    let size = brand.canvas_size().validate()?;
    let (w, h) = (f64::from(size.width), f64::from(size.height));
    let margin = f64::from(brand.headline_margin_ratio) * w;
    let gap = f64::from(brand.headline_gap_px);

    let mut panels = Vec::new();
    let mut area_top = margin;
    let mut area_bottom = h - margin;

    let tag = match &brand.tag {
        Some(tag) => {
            let rect = Rect::new(
                margin,
                margin,
                margin + f64::from(tag.width_px),
                margin + f64::from(tag.height_px),
            );
            panels.push(Panel {
                rect,
                color: brand.headline.accent_color,
            });
            area_top = rect.y1 + gap;
            let style = brand.tag_style(tag);
            let block = layout(
                &tag.label,
                LayoutBox::new(tag.width_px, tag.height_px),
                &label_scale(tag.font_size_px),
                &style,
                painter,
            )?;
            Some((block, style, BoxAnchor::new(rect, VerticalAlign::Center)))
        }
        None => None,
    };

    let footer = match &brand.footer {
        Some(footer) => {
            let style = brand.footer_style(footer);
            let line_h = f64::from(style.line_height(footer.font_size_px));
            let rect = Rect::new(margin, h - margin - line_h, w - margin, h - margin);
            area_bottom = rect.y0 - gap;
            let block = layout(
                &footer.text,
                LayoutBox::new(rect.width() as f32, rect.height() as f32),
                &[footer.font_size_px],
                &style,
                painter,
            )?;
            Some((block, style, BoxAnchor::new(rect, VerticalAlign::Bottom)))
        }
        None => None,
    };

    let anchor = BoxAnchor::new(
        Rect::new(margin, area_top, w - margin, area_bottom),
        VerticalAlign::Center,
    );
    anchor.validate()?;
    let block = layout(
        headline,
        anchor.layout_box(),
        &brand.headline_sizes,
        &brand.headline,
        painter,
    )?;
    if block.truncated {
        tracing::warn!(size = block.font_size, "headline truncated");
    }

    let mut layers = vec![TextLayer {
        block: &block,
        style: &brand.headline,
        anchor,
    }];
    for (block, style, anchor) in tag.iter().chain(footer.iter()) {
        layers.push(TextLayer {
            block,
            style,
            anchor: *anchor,
        });
    }

    let scene = SlideScene {
        background_color: brand.headline.background_color,
        panels,
        layers,
        format_policy: brand.headline.format_policy,
    };
    let canvas = render_scene(Backdrop::Solid(size), &scene, painter)?;
    Ok(Slide {
        index: 0,
        is_headline: true,
        canvas,
    })
}

/// Lay out `text` or return an empty block when there is no room left for it.
fn fit_or_empty(
    text: &str,
    width: f64,
    height: f64,
    sizes: &[f32],
    style: &StyleSpec,
    painter: &dyn TextPainter,
) -> SlideResult<TextBlock> {
    if height >= 1.0 {
        return layout(
            text,
            LayoutBox::new(width as f32, height as f32),
            sizes,
            style,
            painter,
        );
    }
    let size = sizes.last().copied().unwrap_or_default();
    let mut block = TextBlock::empty(style.font(), size, style.line_height(size));
    block.truncated = !text.trim().is_empty();
    Ok(block)
}

/// Render a title and explanation over `background`.
///
/// Both blocks are stacked from the top margin and share one scrim panel covering their drawn
/// extent. `background` is copied, never modified.
#[tracing::instrument(
    level = "debug",
    skip(content, background, brand, painter),
    fields(width = background.width(), height = background.height())
)]
pub fn compose_overlay(
    content: &SlideContent,
    background: &Canvas,
    index: usize,
    brand: &BrandKit,
    painter: &dyn TextPainter,
) -> SlideResult<Slide> {
    brand.validate()?;
    let (w, h) = (f64::from(background.width()), f64::from(background.height()));
    let margin = f64::from(brand.overlay_margin_ratio) * w;
    let box_w = w - 2.0 * margin;
    let avail = h - 2.0 * margin;

    let title = fit_or_empty(
        &content.title,
        box_w,
        avail,
        &brand.title_sizes,
        &brand.title,
        painter,
    )?;
    let title_h = f64::from(title.total_height());
    let body_top = if title.is_empty() {
        margin
    } else {
        margin + title_h + f64::from(brand.block_gap_px)
    };
    let body = fit_or_empty(
        &content.text,
        box_w,
        h - margin - body_top,
        &brand.body_sizes,
        &brand.body,
        painter,
    )?;
    if title.truncated || body.truncated {
        tracing::warn!(index, "overlay text truncated");
    }

    let mut layers = Vec::new();
    if !title.is_empty() {
        layers.push(TextLayer {
            block: &title,
            style: &brand.title,
            anchor: BoxAnchor::new(
                Rect::new(margin, margin, w - margin, margin + title_h),
                VerticalAlign::Top,
            ),
        });
    }
    if !body.is_empty() {
        let body_h = f64::from(body.total_height());
        layers.push(TextLayer {
            block: &body,
            style: &brand.body,
            anchor: BoxAnchor::new(
                Rect::new(margin, body_top, w - margin, body_top + body_h),
                VerticalAlign::Top,
            ),
        });
    }

    let mut panels = Vec::new();
    let scrim = &brand.title;
    if scrim.scrim_opacity > 0.0
        && let Some(extent) = layers
            .iter()
            .filter_map(|l| l.anchor.text_extent(l.block, l.style.alignment))
            .reduce(|a, b| a.union(b))
    {
        let pad = f64::from(scrim.scrim_padding_px);
        panels.push(Panel {
            rect: extent.inflate(pad, pad),
            color: scrim.accent_color.with_opacity(scrim.scrim_opacity),
        });
    }

    let scene = SlideScene {
        background_color: scrim.background_color,
        panels,
        layers,
        format_policy: scrim.format_policy,
    };
    let canvas = render_scene(Backdrop::Image(background), &scene, painter)?;
    Ok(Slide {
        index,
        is_headline: false,
        canvas,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/slides.rs"]
mod tests;
