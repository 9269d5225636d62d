use super::*;

#[test]
fn defaults_follow_the_house_style() {
    let brand = BrandKit::default();
    assert_eq!(brand.canvas_size(), CanvasSize::new(1024, 1024));
    assert_eq!(brand.headline.background_color, Rgba8::rgb(0xf8, 0xf9, 0xfa));
    assert_eq!(brand.headline.accent_color, Rgba8::rgb(0xd9, 0x2d, 0x20));
    assert_eq!(brand.headline.font_family, "Playfair Display");
    assert_eq!(brand.headline_sizes[0], 80.0);
    assert_eq!(brand.title_sizes[0], 80.0);
    assert_eq!(brand.body_sizes[0], 45.0);
    assert_eq!(brand.body.font_weight, 400);
    assert_eq!(brand.block_gap_px, 60.0);

    let tag = brand.tag.as_ref().unwrap();
    assert_eq!(tag.label, "LATEST NEWS");
    assert_eq!((tag.width_px, tag.height_px), (180.0, 40.0));
    let footer = brand.footer.as_ref().unwrap();
    assert_eq!(footer.text, "Finance & Politics Brief");
    assert_eq!(footer.color.to_hex(), "#6c757dff");

    brand.validate().unwrap();
}

#[test]
fn partial_json_keeps_other_defaults() {
    let brand =
        BrandKit::from_json_str(r#"{"canvas_width": 512, "tag": null, "block_gap_px": 20}"#)
            .unwrap();
    assert_eq!(brand.canvas_width, 512);
    assert_eq!(brand.canvas_height, 1024);
    assert!(brand.tag.is_none());
    assert!(brand.footer.is_some());
    assert_eq!(brand.block_gap_px, 20.0);
    assert_eq!(brand.headline, StyleSpec::headline());
}

#[test]
fn out_of_range_values_fail_validation() {
    let wide_margin = BrandKit {
        overlay_margin_ratio: 0.6,
        ..BrandKit::default()
    };
    assert!(matches!(
        wide_margin.validate(),
        Err(SlideError::Validation(_))
    ));

    let flat_tag = BrandKit {
        tag: Some(TagBadge {
            height_px: 0.0,
            ..TagBadge::default()
        }),
        ..BrandKit::default()
    };
    assert!(matches!(flat_tag.validate(), Err(SlideError::Validation(_))));

    let empty = BrandKit {
        canvas_width: 0,
        ..BrandKit::default()
    };
    assert!(matches!(
        empty.validate(),
        Err(SlideError::InvalidDimensions(_))
    ));
}

#[test]
fn hints_override_accent_and_family_only() {
    let brand = BrandKit::default();
    let hints = StyleHints {
        accent_color: Some(Rgba8::rgb(0, 0x66, 0xcc)),
        font_family: Some("Merriweather".to_owned()),
    };
    let out = hints.apply(&brand);
    assert_eq!(out.headline.accent_color, Rgba8::rgb(0, 0x66, 0xcc));
    assert_eq!(out.headline.font_family, "Merriweather");
    assert_eq!(out.title, brand.title);
    assert_eq!(out.body, brand.body);

    let blank = StyleHints {
        font_family: Some("  ".to_owned()),
        ..StyleHints::default()
    };
    assert_eq!(blank.apply(&brand), brand);
}

#[test]
fn strategy_json_field_names_are_accepted() {
    let plan = PostPlan::from_json_str(
        r##"{
            "headline_slide_text": "Central Bank Signals Rate Hike",
            "symbolic_slides": [
                {"slide_title": "The Market Reacts", "slide_text": "Investors are cautious.", "image_prompt": "a bull"},
                {"title": "Next Steps", "text": "Watch the next meeting."}
            ],
            "hints": {"accent_color": "#0066cc"}
        }"##,
    )
    .unwrap();
    assert_eq!(plan.headline, "Central Bank Signals Rate Hike");
    assert_eq!(plan.slides.len(), 2);
    assert_eq!(plan.slides[0].title, "The Market Reacts");
    assert_eq!(plan.slides[1].text, "Watch the next meeting.");
    assert_eq!(plan.hints.accent_color, Some(Rgba8::rgb(0, 0x66, 0xcc)));
    assert_eq!(plan.hints.font_family, None);
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        BrandKit::from_json_str(r#"{"canvas_width": "wide"}"#),
        Err(SlideError::Serde(_))
    ));
    assert!(matches!(
        PostPlan::from_json_str("[1, 2]"),
        Err(SlideError::Serde(_))
    ));
    let err = BrandKit::from_path("no/such/brand.json").unwrap_err();
    assert!(err.to_string().contains("no/such/brand.json"));
}
