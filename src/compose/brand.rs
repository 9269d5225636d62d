use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::core::CanvasSize;
use crate::foundation::error::{SlideError, SlideResult};
use crate::style::color::Rgba8;
use crate::style::spec::{Alignment, StyleSpec};

/// The "LATEST NEWS" tag drawn in the top-left margin of the headline slide.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagBadge {
    /// Badge text.
    pub label: String,
    /// Panel width in pixels.
    pub width_px: f32,
    /// Panel height in pixels.
    pub height_px: f32,
    /// Label font family.
    pub font_family: String,
    /// Label font weight.
    pub font_weight: u16,
    /// Largest label size tried.
    pub font_size_px: f32,
    /// Label color. The panel uses the headline accent color.
    pub text_color: Rgba8,
}

impl Default for TagBadge {
    fn default() -> Self {
        Self {
            label: "LATEST NEWS".to_owned(),
            width_px: 180.0,
            height_px: 40.0,
            font_family: "Inter".to_owned(),
            font_weight: 700,
            font_size_px: 24.0,
            text_color: Rgba8::WHITE,
        }
    }
}

/// Right-aligned caption on the bottom margin of the headline slide.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    /// Caption text.
    pub text: String,
    /// Font family.
    pub font_family: String,
    /// Font weight.
    pub font_weight: u16,
    /// Font size.
    pub font_size_px: f32,
    /// Caption color.
    pub color: Rgba8,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            text: "Finance & Politics Brief".to_owned(),
            font_family: "Inter".to_owned(),
            font_weight: 700,
            font_size_px: 20.0,
            color: Rgba8::rgb(0x6c, 0x75, 0x7d),
        }
    }
}

/// Brand constants shared by every slide of every post.
///
/// Deserializes with defaults for missing fields, so a JSON file only needs the overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandKit {
    /// Headline slide width.
    pub canvas_width: u32,
    /// Headline slide height.
    pub canvas_height: u32,
    /// Headline text style; `background_color` fills the slide, `accent_color` the badge.
    pub headline: StyleSpec,
    /// Headline margin as a fraction of the canvas width.
    pub headline_margin_ratio: f32,
    /// Candidate sizes for the headline, largest first.
    pub headline_sizes: Vec<f32>,
    /// Space between the headline area and the badge or footer.
    pub headline_gap_px: f32,
    /// Optional tag badge.
    pub tag: Option<TagBadge>,
    /// Optional footer caption.
    pub footer: Option<Footer>,
    /// Overlay title style; its scrim settings apply to the whole overlay.
    pub title: StyleSpec,
    /// Overlay explanation style.
    pub body: StyleSpec,
    /// Overlay margin as a fraction of the background width.
    pub overlay_margin_ratio: f32,
    /// Candidate sizes for overlay titles.
    pub title_sizes: Vec<f32>,
    /// Candidate sizes for overlay explanations.
    pub body_sizes: Vec<f32>,
    /// Vertical space between title and explanation.
    pub block_gap_px: f32,
}

impl Default for BrandKit {
    fn default() -> Self {
        Self {
            canvas_width: 1024,
            canvas_height: 1024,
            headline: StyleSpec::headline(),
            headline_margin_ratio: 0.10,
            headline_sizes: vec![80.0, 72.0, 64.0, 56.0, 48.0, 40.0, 32.0],
            headline_gap_px: 40.0,
            tag: Some(TagBadge::default()),
            footer: Some(Footer::default()),
            title: StyleSpec {
                max_lines: Some(3),
                ..StyleSpec::overlay()
            },
            body: StyleSpec {
                font_weight: 400,
                max_lines: Some(8),
                ..StyleSpec::overlay()
            },
            overlay_margin_ratio: 0.08,
            title_sizes: vec![80.0, 72.0, 64.0, 56.0, 48.0, 40.0],
            body_sizes: vec![45.0, 40.0, 36.0, 32.0, 28.0, 24.0],
            block_gap_px: 60.0,
        }
    }
}

impl BrandKit {
    /// Parse a (possibly partial) brand kit from JSON.
    pub fn from_json_str(s: &str) -> SlideResult<Self> {
        serde_json::from_str(s).map_err(|e| SlideError::serde(format!("brand kit json: {e}")))
    }

    /// Read and parse a brand kit JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SlideResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read brand kit '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Headline canvas size.
    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    /// Check every nested style and numeric field.
    pub fn validate(&self) -> SlideResult<()> {
        self.canvas_size().validate()?;
        self.headline.validate()?;
        self.title.validate()?;
        self.body.validate()?;
        for (name, ratio) in [
            ("headline_margin_ratio", self.headline_margin_ratio),
            ("overlay_margin_ratio", self.overlay_margin_ratio),
        ] {
            if !(0.0..0.5).contains(&ratio) {
                return Err(SlideError::validation(format!(
                    "brand {name} must be in 0..0.5, got {ratio}"
                )));
            }
        }
        for (name, v) in [
            ("headline_gap_px", self.headline_gap_px),
            ("block_gap_px", self.block_gap_px),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SlideError::validation(format!(
                    "brand {name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if let Some(tag) = &self.tag {
            let ok = |v: f32| v.is_finite() && v > 0.0;
            if !ok(tag.width_px) || !ok(tag.height_px) || !ok(tag.font_size_px) {
                return Err(SlideError::validation(
                    "brand tag width, height and font size must be > 0",
                ));
            }
        }
        if let Some(footer) = &self.footer
            && (!footer.font_size_px.is_finite() || footer.font_size_px <= 0.0)
        {
            return Err(SlideError::validation("brand footer font size must be > 0"));
        }
        Ok(())
    }

    /// Style used for the tag label.
    pub(crate) fn tag_style(&self, tag: &TagBadge) -> StyleSpec {
        StyleSpec {
            font_family: tag.font_family.clone(),
            font_weight: tag.font_weight,
            text_color: tag.text_color,
            alignment: Alignment::Center,
            max_lines: Some(1),
            ..self.headline.clone()
        }
    }

    /// Style used for the footer caption.
    pub(crate) fn footer_style(&self, footer: &Footer) -> StyleSpec {
        StyleSpec {
            font_family: footer.font_family.clone(),
            font_weight: footer.font_weight,
            text_color: footer.color,
            alignment: Alignment::Right,
            max_lines: Some(1),
            ..self.headline.clone()
        }
    }
}

/// Per-post overrides suggested by the content strategy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleHints {
    /// Replaces the headline accent (badge color).
    pub accent_color: Option<Rgba8>,
    /// Replaces the headline font family.
    pub font_family: Option<String>,
}

impl StyleHints {
    /// `brand` with these hints applied.
    pub fn apply(&self, brand: &BrandKit) -> BrandKit {
        let mut out = brand.clone();
        if let Some(accent) = self.accent_color {
            out.headline.accent_color = accent;
        }
        if let Some(family) = self.font_family.as_deref().filter(|f| !f.trim().is_empty()) {
            out.headline.font_family = family.to_owned();
        }
        out
    }
}

/// Text for one overlay slide.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideContent {
    /// Short bold title.
    #[serde(alias = "slide_title")]
    pub title: String,
    /// Explanation under the title.
    #[serde(alias = "slide_text")]
    pub text: String,
}

/// Content strategy for one post: a headline slide followed by overlay slides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostPlan {
    /// Text of the first, branded slide.
    #[serde(alias = "headline_slide_text")]
    pub headline: String,
    /// One entry per overlay slide, in order.
    #[serde(alias = "symbolic_slides")]
    pub slides: Vec<SlideContent>,
    /// Style overrides.
    pub hints: StyleHints,
}

impl PostPlan {
    /// Parse a post plan from JSON.
    pub fn from_json_str(s: &str) -> SlideResult<Self> {
        serde_json::from_str(s).map_err(|e| SlideError::serde(format!("post plan json: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/brand.rs"]
mod tests;
