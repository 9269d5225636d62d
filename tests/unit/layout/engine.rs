use super::*;
use crate::text::block_font::BlockFont;

fn style_with_max_lines(max_lines: Option<usize>) -> StyleSpec {
    StyleSpec {
        max_lines,
        ..StyleSpec::default()
    }
}

fn caption_500() -> String {
    let words = [
        "markets", "rally", "as", "central", "bank", "signals", "a", "pause", "in", "rate",
        "hikes",
    ];
    let mut out = String::new();
    let mut i = 0;
    while out.chars().count() < 500 {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(words[i % words.len()]);
        i += 1;
    }
    out
}

#[test]
fn breaking_headline_fits_at_largest_size() {
    let block = layout(
        "Breaking: Markets Rally",
        LayoutBox::new(800.0, 200.0),
        &[72.0, 60.0, 48.0, 36.0],
        &style_with_max_lines(Some(2)),
        &BlockFont::default(),
    )
    .unwrap();

    assert_eq!(block.font_size, 72.0);
    assert!(!block.truncated);
    assert!(!block.overflowed);
    assert!((1..=2).contains(&block.lines.len()));
    assert_eq!(block.lines[0].text, "Breaking: Markets");
    assert!(block.total_height() <= 200.0);
}

#[test]
fn long_caption_truncates_to_max_lines_with_ellipsis() {
    let text = caption_500();
    assert!(text.chars().count() >= 500);

    let block = layout(
        &text,
        LayoutBox::new(400.0, 100.0),
        &[40.0, 32.0, 24.0],
        &style_with_max_lines(Some(3)),
        &BlockFont::default(),
    )
    .unwrap();

    assert!(block.truncated);
    assert_eq!(block.font_size, 24.0);
    assert_eq!(block.lines.len(), 3);
    assert!(block.lines[2].text.ends_with('\u{2026}'));
    assert!(block.total_height() <= 100.0);
    for line in &block.lines {
        assert!(line.width <= 400.0, "{line:?}");
    }
}

#[test]
fn picks_largest_fitting_candidate() {
    let metrics = BlockFont::with_advance_ratio(0.5).unwrap();
    let block = layout(
        "abcdefgh",
        LayoutBox::new(250.0, 100.0),
        &[72.0, 60.0, 48.0],
        &StyleSpec::default(),
        &metrics,
    )
    .unwrap();
    assert_eq!(block.font_size, 60.0);
    assert!(!block.truncated);
}

#[test]
fn unbreakable_token_overflows_without_truncation() {
    let block = layout(
        "Supercalifragilisticexpialidocious",
        LayoutBox::new(300.0, 200.0),
        &[40.0, 30.0, 20.0],
        &StyleSpec::default(),
        &BlockFont::default(),
    )
    .unwrap();

    assert_eq!(block.font_size, 20.0);
    assert_eq!(block.lines.len(), 1);
    assert!(block.overflowed);
    assert!(block.lines[0].overflow);
    assert!(!block.truncated);
    assert!(block.lines[0].width > 300.0);
}

#[test]
fn overflowing_token_sits_alone_on_its_line() {
    let block = layout(
        "go Supercalifragilisticexpialidocious now",
        LayoutBox::new(300.0, 200.0),
        &[20.0],
        &StyleSpec::default(),
        &BlockFont::default(),
    )
    .unwrap();
    let texts: Vec<_> = block.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["go", "Supercalifragilisticexpialidocious", "now"]);
    assert_eq!(
        block.lines.iter().map(|l| l.overflow).collect::<Vec<_>>(),
        [false, true, false]
    );
}

#[test]
fn empty_text_is_an_empty_block() {
    let block = layout(
        "  \n ",
        LayoutBox::new(100.0, 100.0),
        &[20.0],
        &StyleSpec::default(),
        &BlockFont::default(),
    )
    .unwrap();
    assert!(block.is_empty());
    assert!(!block.truncated);
    assert_eq!(block.total_height(), 0.0);
}

#[test]
fn explicit_breaks_are_hard_boundaries() {
    let block = layout(
        "One\n\nTwo  words",
        LayoutBox::new(1000.0, 1000.0),
        &[20.0],
        &StyleSpec::default(),
        &BlockFont::default(),
    )
    .unwrap();
    let texts: Vec<_> = block.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["One", "", "Two words"]);
}

#[test]
fn box_shorter_than_one_line_keeps_no_lines() {
    let block = layout(
        "hello world",
        LayoutBox::new(400.0, 10.0),
        &[24.0],
        &StyleSpec::default(),
        &BlockFont::default(),
    )
    .unwrap();
    assert!(block.truncated);
    assert!(block.lines.is_empty());
}

#[test]
fn custom_marker_is_used() {
    let style = StyleSpec {
        max_lines: Some(1),
        ellipsis: "...".to_owned(),
        ..StyleSpec::default()
    };
    let block = layout(
        "one two three four five six",
        LayoutBox::new(120.0, 100.0),
        &[10.0],
        &style,
        &BlockFont::default(),
    )
    .unwrap();
    assert!(block.truncated);
    assert_eq!(block.lines.len(), 1);
    assert!(block.lines[0].text.ends_with("..."));
    assert!(block.lines[0].width <= 120.0);
}

#[test]
fn invalid_inputs_are_rejected() {
    let m = BlockFont::default();
    let s = StyleSpec::default();
    assert!(matches!(
        layout("x", LayoutBox::new(0.0, 10.0), &[10.0], &s, &m),
        Err(SlideError::InvalidDimensions(_))
    ));
    assert!(matches!(
        layout("x", LayoutBox::new(10.0, -1.0), &[10.0], &s, &m),
        Err(SlideError::InvalidDimensions(_))
    ));
    assert!(matches!(
        layout("x", LayoutBox::new(10.0, 10.0), &[], &s, &m),
        Err(SlideError::Validation(_))
    ));
    assert!(matches!(
        layout("x", LayoutBox::new(10.0, 10.0), &[10.0, 10.0], &s, &m),
        Err(SlideError::Validation(_))
    ));
    assert!(matches!(
        layout("x", LayoutBox::new(10.0, 10.0), &[8.0, 12.0], &s, &m),
        Err(SlideError::Validation(_))
    ));
}

#[test]
fn height_and_width_invariants_hold_across_inputs() {
    let metrics = BlockFont::default();
    let texts = [
        "Short".to_owned(),
        "Central Bank Signals Potential Interest Rate Hike Next Quarter.".to_owned(),
        caption_500(),
        "Antidisestablishmentarianism rises".to_owned(),
    ];
    let boxes = [(200.0, 60.0), (400.0, 100.0), (800.0, 600.0), (120.0, 300.0)];
    let candidates = [56.0, 44.0, 32.0, 20.0];

    for text in &texts {
        for &(w, h) in &boxes {
            for max_lines in [None, Some(2), Some(5)] {
                let block = layout(
                    text,
                    LayoutBox::new(w, h),
                    &candidates,
                    &style_with_max_lines(max_lines),
                    &metrics,
                )
                .unwrap();
                assert!(block.total_height() <= h, "{text} in {w}x{h}");
                if let Some(max) = max_lines {
                    assert!(block.lines.len() <= max);
                }
                for line in &block.lines {
                    assert!(line.width <= w || line.overflow, "{line:?} in {w}x{h}");
                }
                assert_eq!(block.overflowed, block.lines.iter().any(|l| l.overflow));

                // No larger candidate could have fit without truncation.
                if !block.truncated && !block.overflowed {
                    for &bigger in candidates.iter().filter(|&&c| c > block.font_size) {
                        let alt = layout(
                            text,
                            LayoutBox::new(w, h),
                            &[bigger],
                            &style_with_max_lines(max_lines),
                            &metrics,
                        )
                        .unwrap();
                        assert!(alt.truncated || alt.overflowed);
                    }
                }
            }
        }
    }
}
