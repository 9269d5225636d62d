use super::*;

#[test]
fn from_raw_rejects_length_mismatch() {
    let err = Canvas::from_raw(2, 2, PixelFormat::Rgba8, vec![0; 12]).unwrap_err();
    assert!(matches!(err, SlideError::InvalidDimensions(_)));

    let ok = Canvas::from_raw(2, 2, PixelFormat::Rgb8, vec![0; 12]).unwrap();
    assert_eq!(ok.size(), CanvasSize::new(2, 2));
}

#[test]
fn zero_and_oversized_sizes_are_invalid() {
    assert!(matches!(
        Canvas::filled(0, 4, PixelFormat::Rgb8, [0, 0, 0, 255]),
        Err(SlideError::InvalidDimensions(_))
    ));
    assert!(matches!(
        CanvasSize::new(MAX_CANVAS_EDGE + 1, 1).validate(),
        Err(SlideError::InvalidDimensions(_))
    ));
}

#[test]
fn pixel_reads_expand_rgb_to_opaque() {
    let c = Canvas::filled(3, 2, PixelFormat::Rgb8, [10, 20, 30, 7]).unwrap();
    assert_eq!(c.data().len(), 18);
    assert_eq!(c.pixel(2, 1), Some([10, 20, 30, 255]));
    assert_eq!(c.pixel(3, 0), None);
    assert_eq!(&c.to_rgba8()[..4], &[10, 20, 30, 255]);
}
