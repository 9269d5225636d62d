use serde::{Deserialize, Serialize};

use crate::foundation::error::{SlideError, SlideResult};
use crate::style::spec::{FontSpec, StyleSpec};
use crate::text::measure::TextMeasure;

/// Maximum area available to a text block, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    /// Maximum line width.
    pub width: f32,
    /// Maximum block height.
    pub height: f32,
}

impl LayoutBox {
    /// Construct a box without validation.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn validate(self, text_len: usize) -> SlideResult<Self> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if !ok(self.width) || !ok(self.height) {
            return Err(SlideError::invalid_dimensions(format!(
                "layout box {}x{} must have positive width and height (text length {text_len})",
                self.width, self.height
            )));
        }
        Ok(self)
    }
}

/// One laid-out line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Line contents, words joined by single spaces.
    pub text: String,
    /// Measured advance width at the block's font size.
    pub width: f32,
    /// Line box height (same for every line of a block).
    pub height: f32,
    /// The line is a single token wider than the box.
    pub overflow: bool,
}

/// Result of fitting text into a [`LayoutBox`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Lines top to bottom.
    pub lines: Vec<TextLine>,
    /// Font the lines were measured with.
    pub font: FontSpec,
    /// Chosen candidate size.
    pub font_size: f32,
    /// Vertical advance between lines.
    pub line_height: f32,
    /// Lines were dropped and the last kept line ends with the ellipsis marker.
    pub truncated: bool,
    /// At least one line is an unbreakable token wider than the box.
    pub overflowed: bool,
}

impl TextBlock {
    /// Block with no lines.
    pub fn empty(font: FontSpec, font_size: f32, line_height: f32) -> Self {
        Self {
            lines: Vec::new(),
            font,
            font_size,
            line_height,
            truncated: false,
            overflowed: false,
        }
    }

    /// Return `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `line_count * line_height`.
    pub fn total_height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    /// Widest measured line, `0` for an empty block.
    pub fn max_line_width(&self) -> f32 {
        self.lines.iter().map(|l| l.width).fold(0.0, f32::max)
    }
}

/// Fit `text` into `bx`, trying `font_candidates` largest first.
///
/// The first candidate whose wrapped lines fit the box height, respect `style.max_lines`, and
/// contain no over-wide token wins. When none does, the smallest candidate is used: lines that
/// do not fit are dropped and the last kept line gets `style.ellipsis` (`truncated`), while a
/// token that is wider than the box on its own is kept whole on its own line (`overflowed`).
#[tracing::instrument(
    level = "debug",
    skip(text, font_candidates, style, metrics),
    fields(text_len = text.len(), box_w = bx.width, box_h = bx.height)
)]
pub fn layout<M: TextMeasure + ?Sized>(
    text: &str,
    bx: LayoutBox,
    font_candidates: &[f32],
    style: &StyleSpec,
    metrics: &M,
) -> SlideResult<TextBlock> {
    let bx = bx.validate(text.len())?;
    validate_candidates(font_candidates)?;
    style.validate()?;

    let font = style.font();
    let paragraphs = split_paragraphs(text);
    if paragraphs.is_empty() {
        let size = font_candidates[0];
        return Ok(TextBlock::empty(font, size, style.line_height(size)));
    }

    for &size in font_candidates {
        let line_height = style.line_height(size);
        let lines = wrap_paragraphs(&paragraphs, bx.width, &font, size, line_height, metrics)?;
        let fits_height = lines.len() as f32 * line_height <= bx.height;
        let fits_count = style.max_lines.is_none_or(|max| lines.len() <= max);
        if fits_height && fits_count && !lines.iter().any(|l| l.overflow) {
            tracing::debug!(size, lines = lines.len(), "text fits");
            return Ok(TextBlock {
                lines,
                font,
                font_size: size,
                line_height,
                truncated: false,
                overflowed: false,
            });
        }
    }

    let size = font_candidates[font_candidates.len() - 1];
    let line_height = style.line_height(size);
    let mut lines = wrap_paragraphs(&paragraphs, bx.width, &font, size, line_height, metrics)?;

    let by_height = (bx.height / line_height).floor() as usize;
    let allowed = style.max_lines.map_or(by_height, |max| max.min(by_height));
    let truncated = lines.len() > allowed;
    if truncated {
        lines.truncate(allowed);
        if let Some(last) = lines.pop() {
            lines.push(ellipsize(
                &last,
                &style.ellipsis,
                bx.width,
                &font,
                size,
                metrics,
            )?);
        }
        tracing::warn!(
            size,
            kept = lines.len(),
            text_len = text.len(),
            "text truncated at smallest candidate size"
        );
    }

    let overflowed = lines.iter().any(|l| l.overflow);
    if overflowed {
        tracing::warn!(size, box_w = bx.width, "unbreakable token wider than layout box");
    }

    Ok(TextBlock {
        lines,
        font,
        font_size: size,
        line_height,
        truncated,
        overflowed,
    })
}

fn validate_candidates(font_candidates: &[f32]) -> SlideResult<()> {
    if font_candidates.is_empty() {
        return Err(SlideError::validation("font candidate scale must be non-empty"));
    }
    if let Some(bad) = font_candidates
        .iter()
        .find(|s| !s.is_finite() || **s <= 0.0)
    {
        return Err(SlideError::validation(format!(
            "font candidate sizes must be finite and > 0, got {bad}"
        )));
    }
    if font_candidates.windows(2).any(|w| w[0] <= w[1]) {
        return Err(SlideError::validation(format!(
            "font candidate scale must be strictly decreasing, got {font_candidates:?}"
        )));
    }
    Ok(())
}

/// Hard breaks on `\n`; each paragraph is its whitespace-separated words. Surrounding blank
/// lines are dropped, inner blank lines become empty paragraphs.
fn split_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|p| p.split_whitespace().collect())
        .collect()
}

fn wrap_paragraphs<M: TextMeasure + ?Sized>(
    paragraphs: &[Vec<&str>],
    max_width: f32,
    font: &FontSpec,
    size: f32,
    line_height: f32,
    metrics: &M,
) -> SlideResult<Vec<TextLine>> {
    let make_line = |text: String, width: f32| TextLine {
        text,
        width,
        height: line_height,
        overflow: width > max_width,
    };

    let mut lines = Vec::new();
    for words in paragraphs {
        let Some((first, rest)) = words.split_first() else {
            lines.push(make_line(String::new(), 0.0));
            continue;
        };

        let mut current = (*first).to_owned();
        let mut current_w = metrics.measure(&current, font, size)?;
        for word in rest {
            let candidate = format!("{current} {word}");
            let w = metrics.measure(&candidate, font, size)?;
            if w <= max_width {
                current = candidate;
                current_w = w;
            } else {
                lines.push(make_line(std::mem::take(&mut current), current_w));
                current = (*word).to_owned();
                current_w = metrics.measure(&current, font, size)?;
            }
        }
        lines.push(make_line(current, current_w));
    }
    Ok(lines)
}

/// Append `marker`, dropping trailing characters until the result fits `max_width`.
fn ellipsize<M: TextMeasure + ?Sized>(
    line: &TextLine,
    marker: &str,
    max_width: f32,
    font: &FontSpec,
    size: f32,
    metrics: &M,
) -> SlideResult<TextLine> {
    let mut base = line.text.trim_end().to_owned();
    loop {
        let text = format!("{base}{marker}");
        let width = metrics.measure(&text, font, size)?;
        if width <= max_width || base.is_empty() {
            return Ok(TextLine {
                text,
                width,
                height: line.height,
                overflow: width > max_width,
            });
        }
        base.pop();
        base.truncate(base.trim_end().len());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
