use super::*;
use crate::foundation::core::PixelFormat;
use crate::foundation::error::SlideError;
use crate::style::spec::FormatPolicy;
use crate::text::block_font::BlockFont;

fn gray(width: u32, height: u32) -> Canvas {
    Canvas::filled(width, height, PixelFormat::Rgba8, [128, 128, 128, 255]).unwrap()
}

#[test]
fn headline_slide_has_badge_footer_and_background() {
    let brand = BrandKit::default();
    let slide = compose_headline(
        "Central Bank Signals Potential Interest Rate Hike Next Quarter.",
        &brand,
        &BlockFont::default(),
    )
    .unwrap();

    assert_eq!(slide.index, 0);
    assert!(slide.is_headline);
    let c = &slide.canvas;
    assert_eq!((c.width(), c.height()), (1024, 1024));
    assert_eq!(c.format(), PixelFormat::Rgb8);

    assert_eq!(c.pixel(0, 0), Some([0xf8, 0xf9, 0xfa, 255]));
    assert_eq!(c.pixel(1023, 1023), Some([0xf8, 0xf9, 0xfa, 255]));
    // Badge panel, left of the centered label.
    assert_eq!(c.pixel(105, 104), Some([0xd9, 0x2d, 0x20, 255]));
    // Last glyph of the right-aligned footer.
    assert_eq!(c.pixel(915, 910), Some([0x6c, 0x75, 0x7d, 255]));
}

#[test]
fn headline_without_decorations_only_draws_text() {
    let brand = BrandKit {
        tag: None,
        footer: None,
        ..BrandKit::default()
    };
    let slide = compose_headline("Rates hold", &brand, &BlockFont::default()).unwrap();
    let c = &slide.canvas;
    assert_eq!(c.pixel(105, 104), Some([0xf8, 0xf9, 0xfa, 255]));
    assert_eq!(c.pixel(915, 910), Some([0xf8, 0xf9, 0xfa, 255]));
    let plain = Canvas::filled(1024, 1024, PixelFormat::Rgb8, [0xf8, 0xf9, 0xfa, 255]).unwrap();
    assert_ne!(c, &plain);
}

#[test]
fn headline_that_cannot_fit_the_canvas_is_rejected() {
    let brand = BrandKit {
        canvas_width: 200,
        canvas_height: 120,
        ..BrandKit::default()
    };
    assert!(matches!(
        compose_headline("Too small", &brand, &BlockFont::default()),
        Err(SlideError::InvalidDimensions(_))
    ));
}

#[test]
fn overlay_draws_scrim_and_text_without_touching_background() {
    let bg = gray(800, 600);
    let before = bg.clone();
    let content = SlideContent {
        title: "The Market Reacts".to_owned(),
        text: "Investors are cautiously optimistic following the Fed's announcement.".to_owned(),
    };
    let slide = compose_overlay(&content, &bg, 3, &BrandKit::default(), &BlockFont::default())
        .unwrap();

    assert_eq!(bg, before);
    assert_eq!(slide.index, 3);
    assert!(!slide.is_headline);
    let c = &slide.canvas;
    assert_eq!(c.format(), PixelFormat::Rgba8);
    assert_eq!(c.pixel(0, 0), Some([128, 128, 128, 255]));
    assert_eq!(c.pixel(799, 599), Some([128, 128, 128, 255]));

    // Scrim padding above-left of the title.
    let px = c.pixel(40, 40).unwrap();
    for ch in &px[..3] {
        assert!((i16::from(*ch) - 51).abs() <= 2, "{px:?}");
    }

    // Some white text is drawn.
    let white = (0..600)
        .flat_map(|y| (0..800).map(move |x| (x, y)))
        .filter(|&(x, y)| c.pixel(x, y) == Some([255, 255, 255, 255]))
        .count();
    assert!(white > 0);
}

#[test]
fn overlay_with_no_text_is_a_copy() {
    let bg = gray(64, 48);
    let slide = compose_overlay(
        &SlideContent::default(),
        &bg,
        1,
        &BrandKit::default(),
        &BlockFont::default(),
    )
    .unwrap();
    assert_eq!(slide.canvas, bg);
}

#[test]
fn overlay_on_rgb_follows_format_policy() {
    let bg = Canvas::filled(800, 600, PixelFormat::Rgb8, [20, 40, 60, 255]).unwrap();
    let content = SlideContent {
        title: "Title".to_owned(),
        text: String::new(),
    };
    let upgraded = compose_overlay(&content, &bg, 1, &BrandKit::default(), &BlockFont::default())
        .unwrap();
    assert_eq!(upgraded.canvas.format(), PixelFormat::Rgba8);

    let mut brand = BrandKit::default();
    brand.title.format_policy = FormatPolicy::Reject;
    assert!(matches!(
        compose_overlay(&content, &bg, 1, &brand, &BlockFont::default()),
        Err(SlideError::UnsupportedFormat(_))
    ));

    brand.title.scrim_opacity = 0.0;
    let plain = compose_overlay(&content, &bg, 1, &brand, &BlockFont::default()).unwrap();
    assert_eq!(plain.canvas.format(), PixelFormat::Rgb8);
    assert_eq!(plain.canvas.pixel(0, 0), Some([20, 40, 60, 255]));
}

#[test]
fn overlay_body_without_room_is_marked_truncated() {
    let block = fit_or_empty(
        "no room",
        100.0,
        0.5,
        &[20.0, 10.0],
        &BrandKit::default().body,
        &BlockFont::default(),
    )
    .unwrap();
    assert!(block.is_empty());
    assert!(block.truncated);
    assert_eq!(block.font_size, 10.0);
}
