use serde::{Deserialize, Serialize};

use crate::foundation::error::{SlideError, SlideResult};
use crate::style::color::Rgba8;

/// Horizontal placement of each line inside its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

impl Alignment {
    /// Offset of a line of width `line_w` inside a box of width `box_w`.
    pub fn offset(self, box_w: f64, line_w: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => (box_w - line_w) / 2.0,
            Self::Right => box_w - line_w,
        }
    }
}

/// What the renderer does when a translucent overlay meets a background without alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatPolicy {
    /// Promote the background to RGBA and return an RGBA canvas.
    #[default]
    Upgrade,
    /// Fail with [`SlideError::UnsupportedFormat`].
    Reject,
}

/// Font selection: family name plus CSS-style weight (100..=900, 400 regular, 700 bold).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontSpec {
    /// Family name as reported by the font file.
    pub family: String,
    /// Requested weight.
    pub weight: u16,
}

impl FontSpec {
    /// Construct a font selection.
    pub fn new(family: impl Into<String>, weight: u16) -> Self {
        Self {
            family: family.into(),
            weight,
        }
    }
}

/// Per-call styling for layout and rendering. Never mutated by the compositor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSpec {
    /// Font family used for measuring and drawing.
    pub font_family: String,
    /// Font weight (100..=1000).
    pub font_weight: u16,
    /// Glyph color.
    pub text_color: Rgba8,
    /// Fill for slides without a background image.
    pub background_color: Rgba8,
    /// Brand accent: scrim panels and badges.
    pub accent_color: Rgba8,
    /// Distance between canvas edge and text box.
    pub margin_px: f32,
    /// Optional hard cap on the number of lines.
    pub max_lines: Option<usize>,
    /// Horizontal line alignment.
    pub alignment: Alignment,
    /// Scrim opacity over background images; `0` disables the scrim.
    pub scrim_opacity: f32,
    /// Extra space the scrim extends beyond the drawn text.
    pub scrim_padding_px: f32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
    /// Marker appended to the last line when text is truncated.
    pub ellipsis: String,
    /// Handling of RGB backgrounds under a translucent scrim.
    pub format_policy: FormatPolicy,
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_owned(),
            font_weight: 400,
            text_color: Rgba8::BLACK,
            background_color: Rgba8::WHITE,
            accent_color: Rgba8::BLACK,
            margin_px: 0.0,
            max_lines: None,
            alignment: Alignment::Left,
            scrim_opacity: 0.0,
            scrim_padding_px: 0.0,
            line_spacing: 1.2,
            ellipsis: "\u{2026}".to_owned(),
            format_policy: FormatPolicy::Upgrade,
        }
    }
}

impl StyleSpec {
    /// Headline slide preset: serif display face on the light brand background.
    pub fn headline() -> Self {
        Self {
            font_family: "Playfair Display".to_owned(),
            font_weight: 800,
            text_color: Rgba8::BLACK,
            background_color: Rgba8::rgb(0xf8, 0xf9, 0xfa),
            accent_color: Rgba8::rgb(0xd9, 0x2d, 0x20),
            margin_px: 102.0,
            max_lines: Some(6),
            ..Self::default()
        }
    }

    /// Overlay slide preset: white bold sans text over a 60% black scrim.
    pub fn overlay() -> Self {
        Self {
            font_family: "Inter".to_owned(),
            font_weight: 700,
            text_color: Rgba8::WHITE,
            background_color: Rgba8::BLACK,
            accent_color: Rgba8::BLACK,
            margin_px: 82.0,
            max_lines: Some(4),
            scrim_opacity: 0.6,
            scrim_padding_px: 30.0,
            ..Self::default()
        }
    }

    /// Font selection described by this style.
    pub fn font(&self) -> FontSpec {
        FontSpec::new(self.font_family.clone(), self.font_weight)
    }

    /// Line height for `size_px` under this style's leading ratio.
    pub fn line_height(&self, size_px: f32) -> f32 {
        size_px * self.line_spacing
    }

    /// Check numeric ranges.
    pub fn validate(&self) -> SlideResult<()> {
        if self.font_family.trim().is_empty() {
            return Err(SlideError::validation("style font_family must be non-empty"));
        }
        if !(1..=1000).contains(&self.font_weight) {
            return Err(SlideError::validation(format!(
                "style font_weight must be in 1..=1000, got {}",
                self.font_weight
            )));
        }
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(SlideError::validation(
                "style line_spacing must be finite and > 0",
            ));
        }
        if !self.margin_px.is_finite() || self.margin_px < 0.0 {
            return Err(SlideError::validation(
                "style margin_px must be finite and >= 0",
            ));
        }
        if !self.scrim_padding_px.is_finite() || self.scrim_padding_px < 0.0 {
            return Err(SlideError::validation(
                "style scrim_padding_px must be finite and >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.scrim_opacity) {
            return Err(SlideError::validation(format!(
                "style scrim_opacity must be in 0..=1, got {}",
                self.scrim_opacity
            )));
        }
        if self.max_lines == Some(0) {
            return Err(SlideError::validation("style max_lines must be >= 1 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/spec.rs"]
mod tests;
