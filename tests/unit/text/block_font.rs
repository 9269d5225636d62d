use super::*;

#[test]
fn measure_counts_chars_not_bytes() {
    let f = BlockFont::default();
    let font = FontSpec::new("any", 400);
    assert_eq!(f.measure("abcd", &font, 10.0).unwrap(), 24.0);
    assert_eq!(f.measure("\u{2026}", &font, 10.0).unwrap(), 6.0);
    assert_eq!(f.measure("", &font, 10.0).unwrap(), 0.0);
}

#[test]
fn invalid_ratio_is_rejected() {
    assert!(BlockFont::with_advance_ratio(0.0).is_err());
    assert!(BlockFont::with_advance_ratio(f32::NAN).is_err());
    assert_eq!(BlockFont::with_advance_ratio(0.5).unwrap().advance_ratio, 0.5);
}
