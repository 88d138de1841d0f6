mod common;

use astrostack_core::frame::PixelBuffer;
use astrostack_core::io::image_io::{
    image_dimensions, load_frame, save_image, save_png, save_tiff, to_rgba_image,
};
use astrostack_core::StackError;

#[test]
fn test_png_roundtrip_is_lossless() {
    let frame = common::pattern(12, 8, 3);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");

    save_png(&frame, &path).unwrap();
    let loaded = load_frame(&path, None).unwrap();
    assert_eq!(loaded, frame);
}

#[test]
fn test_tiff_roundtrip() {
    let frame = PixelBuffer::filled(4, 4, [10, 20, 30, 255]).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.tiff");

    save_tiff(&frame, &path).unwrap();
    let loaded = load_frame(&path, None).unwrap();
    assert_eq!(loaded.pixel(2, 2), Some([10, 20, 30, 255]));
}

#[test]
fn test_load_downsizes_wide_images() {
    let frame = common::gray(8, 4, 100);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.png");

    save_image(&frame, &path).unwrap();
    let loaded = load_frame(&path, Some(4)).unwrap();
    assert_eq!(loaded.dimensions(), (4, 2));
    assert_eq!(loaded.pixel(1, 1), Some([100, 100, 100, 255]));
}

#[test]
fn test_load_keeps_narrow_images() {
    let frame = common::gray(6, 3, 50);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("narrow.png");

    save_png(&frame, &path).unwrap();
    let loaded = load_frame(&path, Some(1280)).unwrap();
    assert_eq!(loaded.dimensions(), (6, 3));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_frame(&dir.path().join("missing.png"), None).is_err());
}

#[test]
fn test_to_rgba_image_keeps_dimensions() {
    let frame = common::pattern(6, 3, 5);
    let img = to_rgba_image(&frame).unwrap();
    assert_eq!(img.dimensions(), (6, 3));
    assert_eq!(img.as_raw().as_slice(), frame.samples());
}

#[test]
fn test_image_dimensions_within_range() {
    assert_eq!(image_dimensions(640, 480).unwrap(), (640, 480));
    assert_eq!(
        image_dimensions(u32::MAX as usize, 1).unwrap(),
        (u32::MAX, 1)
    );
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_image_dimensions_overflow_is_reported() {
    let too_wide = u32::MAX as usize + 1;
    let err = image_dimensions(too_wide, 2).unwrap_err();
    match err {
        StackError::InvalidDimensions { width, height } => {
            assert_eq!(width, too_wide);
            assert_eq!(height, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(image_dimensions(2, too_wide).is_err());
}
