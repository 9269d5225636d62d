//! slidesmith turns {background image, text, style} into finished branded slide images.
//!
//! Two pure building blocks do the work:
//!
//! - [`layout()`] fits text into a box, choosing the largest size from a descending candidate
//!   scale and falling back to ellipsis truncation at the smallest size.
//! - [`render()`] draws a fitted [`TextBlock`] over a solid brand canvas or a supplied image,
//!   with an optional translucent scrim behind the text.
//!
//! Font metrics are injected through [`TextMeasure`] / [`TextPainter`]; [`FontBook`] shapes
//! real fonts with parley and [`BlockFont`] is a font-free placeholder. [`compose_post`] builds
//! a whole post (headline slide plus overlays) from a [`PostPlan`] and a [`BrandKit`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod assets;
pub mod compose;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod style;
pub mod text;

pub use crate::assets::decode::{decode_canvas, encode_png, load_canvas};
pub use crate::compose::brand::{BrandKit, Footer, PostPlan, SlideContent, StyleHints, TagBadge};
pub use crate::compose::post::{RenderThreading, compose_post};
pub use crate::compose::slides::{Slide, compose_headline, compose_overlay};
pub use crate::foundation::core::{Canvas, CanvasSize, PixelFormat, Rect};
pub use crate::foundation::error::{SlideError, SlideResult};
pub use crate::layout::engine::{LayoutBox, TextBlock, TextLine, layout};
pub use crate::render::slide::{
    Backdrop, BoxAnchor, Panel, SlideScene, TextLayer, VerticalAlign, render, render_scene,
};
pub use crate::style::color::Rgba8;
pub use crate::style::spec::{Alignment, FontSpec, FormatPolicy, StyleSpec};
pub use crate::text::block_font::BlockFont;
pub use crate::text::fonts::FontBook;
pub use crate::text::measure::{LinePaint, TextMeasure, TextPainter};
