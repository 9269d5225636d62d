use super::*;
use crate::compose::brand::{SlideContent, StyleHints};
use crate::foundation::core::PixelFormat;
use crate::style::color::Rgba8;
use crate::text::block_font::BlockFont;

fn small_brand() -> BrandKit {
    BrandKit {
        canvas_width: 256,
        canvas_height: 256,
        ..BrandKit::default()
    }
}

fn plan(slides: usize) -> PostPlan {
    PostPlan {
        headline: "Rates hold".to_owned(),
        slides: (0..slides)
            .map(|i| SlideContent {
                title: format!("Point {i}"),
                text: "Markets shrug off the decision.".to_owned(),
            })
            .collect(),
        hints: StyleHints::default(),
    }
}

fn backgrounds(n: usize) -> Vec<Option<Canvas>> {
    (0..n)
        .map(|i| {
            let v = 40 * (i as u8 + 1);
            Canvas::filled(320, 240, PixelFormat::Rgba8, [v, v, v, 255]).ok()
        })
        .collect()
}

#[test]
fn headline_first_then_one_overlay_per_slide() {
    let results = compose_post(
        &plan(2),
        &backgrounds(2),
        &small_brand(),
        &BlockFont::default(),
        RenderThreading::default(),
    )
    .unwrap();
    assert_eq!(results.len(), 3);
    let slides: Vec<_> = results.into_iter().map(Result::unwrap).collect();
    assert!(slides[0].is_headline);
    assert_eq!(slides[0].canvas.width(), 256);
    for (i, slide) in slides.iter().enumerate().skip(1) {
        assert_eq!(slide.index, i);
        assert!(!slide.is_headline);
        assert_eq!(slide.canvas.width(), 320);
    }
}

#[test]
fn missing_background_fails_only_that_slide() {
    let results = compose_post(
        &plan(3),
        &backgrounds(1),
        &small_brand(),
        &BlockFont::default(),
        RenderThreading::default(),
    )
    .unwrap();
    assert_eq!(results.len(), 4);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(matches!(results[2], Err(SlideError::Validation(_))));
    assert!(matches!(results[3], Err(SlideError::Validation(_))));

    let mut gaps = backgrounds(2);
    gaps[0] = None;
    let results = compose_post(
        &plan(2),
        &gaps,
        &small_brand(),
        &BlockFont::default(),
        RenderThreading::default(),
    )
    .unwrap();
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}

#[test]
fn parallel_matches_sequential() {
    let plan = plan(3);
    let bgs = backgrounds(3);
    let brand = small_brand();
    let run = |threading| {
        compose_post(&plan, &bgs, &brand, &BlockFont::default(), threading)
            .unwrap()
            .into_iter()
            .map(Result::unwrap)
            .collect::<Vec<_>>()
    };
    let sequential = run(RenderThreading::default());
    let parallel = run(RenderThreading {
        parallel: true,
        threads: Some(2),
    });
    assert_eq!(sequential, parallel);
}

#[test]
fn zero_threads_is_rejected() {
    let err = compose_post(
        &plan(0),
        &[],
        &small_brand(),
        &BlockFont::default(),
        RenderThreading {
            parallel: true,
            threads: Some(0),
        },
    )
    .unwrap_err();
    assert!(matches!(err, SlideError::Validation(_)));
}

#[test]
fn hints_recolor_the_badge() {
    let mut plan = plan(0);
    plan.hints.accent_color = Some(Rgba8::rgb(0, 0x66, 0xcc));
    let results = compose_post(
        &plan,
        &[],
        &small_brand(),
        &BlockFont::default(),
        RenderThreading::default(),
    )
    .unwrap();
    let headline = results[0].as_ref().unwrap();
    assert_eq!(headline.canvas.pixel(28, 28), Some([0, 0x66, 0xcc, 255]));
}
