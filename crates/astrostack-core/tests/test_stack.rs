mod common;

use astrostack_core::frame::{AlignmentOffset, PixelBuffer};
use astrostack_core::pipeline::config::{AlignmentMode, StackMode, StackOptions};
use astrostack_core::stack::combine;
use astrostack_core::StackError;

fn options(mode: StackMode) -> StackOptions {
    StackOptions::new(mode, AlignmentMode::None)
}

fn zeros(n: usize) -> Vec<AlignmentOffset> {
    vec![AlignmentOffset::ZERO; n]
}

#[test]
fn test_output_dimensions_match_input() {
    let frames = vec![common::pattern(13, 7, 0), common::pattern(13, 7, 20)];
    let result = combine(&frames, &zeros(2), &options(StackMode::Average)).unwrap();
    assert_eq!(result.image.dimensions(), (13, 7));
    assert_eq!(result.metadata.frame_count, 2);
    assert!(result.metadata.elapsed_ms >= 0.0);
}

#[test]
fn test_single_frame_identity_average() {
    let frame = common::pattern(9, 6, 10);
    let result = combine(&[frame.clone()], &zeros(1), &options(StackMode::Average)).unwrap();
    assert_eq!(result.image, frame);
}

#[test]
fn test_single_frame_identity_median() {
    let frame = common::pattern(9, 6, 10);
    let result = combine(&[frame.clone()], &zeros(1), &options(StackMode::Median)).unwrap();
    assert_eq!(result.image, frame);
}

#[test]
fn test_single_frame_identity_with_sigma_clip() {
    let frame = common::pattern(5, 5, 0);
    let opts = options(StackMode::Average).with_sigma_clip(2.2);
    let result = combine(&[frame.clone()], &zeros(1), &opts).unwrap();
    assert_eq!(result.image, frame);
}

#[test]
fn test_average_of_black_and_white_rounds_half_up() {
    let frames = vec![common::gray(4, 4, 0), common::gray(4, 4, 255)];
    let result = combine(&frames, &zeros(2), &options(StackMode::Average)).unwrap();
    for px in result.image.samples().chunks_exact(4) {
        assert_eq!(px, &[128, 128, 128, 255]);
    }
}

#[test]
fn test_median_even_count_averages_middle_values() {
    let frames: Vec<PixelBuffer> = [10u8, 20, 40, 90]
        .iter()
        .map(|&v| common::gray(4, 4, v))
        .collect();
    let result = combine(&frames, &zeros(4), &options(StackMode::Median)).unwrap();
    // (20 + 40) / 2
    assert_eq!(result.image.pixel(2, 2), Some([30, 30, 30, 255]));
}

#[test]
fn test_median_odd_count() {
    let frames: Vec<PixelBuffer> = [5u8, 250, 100]
        .iter()
        .map(|&v| common::gray(3, 3, v))
        .collect();
    let result = combine(&frames, &zeros(3), &options(StackMode::Median)).unwrap();
    assert_eq!(result.image.pixel(0, 0), Some([100, 100, 100, 255]));
}

#[test]
fn test_output_alpha_is_opaque() {
    let translucent = PixelBuffer::filled(4, 4, [50, 60, 70, 10]).unwrap();
    let result = combine(
        &[translucent.clone(), translucent],
        &zeros(2),
        &options(StackMode::Average),
    )
    .unwrap();
    assert_eq!(result.image.pixel(1, 1), Some([50, 60, 70, 255]));
}

#[test]
fn test_inputs_not_modified() {
    let frames = vec![common::pattern(8, 8, 0), common::pattern(8, 8, 30)];
    let before = frames.clone();
    let _ = combine(&frames, &zeros(2), &options(StackMode::Median).with_sigma_clip(1.0)).unwrap();
    assert_eq!(frames, before);
}

#[test]
fn test_offset_shifts_single_frame() {
    let frame = common::pattern(6, 4, 0);
    let offsets = vec![AlignmentOffset::new(1, 0)];
    let result = combine(&[frame.clone()], &offsets, &options(StackMode::Average)).unwrap();

    // Output (x, y) is read from frame (x - 1, y)
    for y in 0..4 {
        assert_eq!(result.image.pixel(0, y), Some([0, 0, 0, 0]));
        for x in 1..6 {
            assert_eq!(result.image.pixel(x, y), frame.pixel(x - 1, y));
        }
    }
}

#[test]
fn test_out_of_bounds_samples_are_excluded_not_zero() {
    let frames = vec![common::gray(5, 5, 100), common::gray(5, 5, 200)];
    let offsets = vec![AlignmentOffset::ZERO, AlignmentOffset::new(1, 0)];
    let result = combine(&frames, &offsets, &options(StackMode::Average)).unwrap();

    // Column 0 is only covered by the first frame
    assert_eq!(result.image.pixel(0, 2), Some([100, 100, 100, 255]));
    assert_eq!(result.image.pixel(3, 2), Some([150, 150, 150, 255]));
}

#[test]
fn test_large_offset_leaves_transparent_output() {
    let frame = common::gray(4, 4, 90);
    let offsets = vec![AlignmentOffset::new(10, -10)];
    let result = combine(&[frame], &offsets, &options(StackMode::Median)).unwrap();
    assert!(result.image.samples().iter().all(|&s| s == 0));
}

#[test]
fn test_large_frames_parallel_average() {
    // 320x240 = 76800 >= PARALLEL_PIXEL_THRESHOLD
    let frames = vec![
        common::pattern(320, 240, 0),
        common::pattern(320, 240, 10),
        common::pattern(320, 240, 20),
    ];
    let result = combine(&frames, &zeros(3), &options(StackMode::Average)).unwrap();
    let middle = &frames[1];
    for y in (0..240).step_by(17) {
        for x in (0..320).step_by(13) {
            let expected = middle.pixel(x, y).unwrap();
            let actual = result.image.pixel(x, y).unwrap();
            assert_eq!(actual[0], expected[0]);
            assert_eq!(actual[2], expected[2]);
        }
    }
}

#[test]
fn test_parallel_and_sequential_paths_agree() {
    let big: Vec<PixelBuffer> = (0..4).map(|k| common::pattern(300, 240, k * 9)).collect();
    let offsets = vec![
        AlignmentOffset::ZERO,
        AlignmentOffset::new(2, -1),
        AlignmentOffset::new(-3, 0),
        AlignmentOffset::new(1, 4),
    ];
    let opts = options(StackMode::Median).with_sigma_clip(1.5);
    let stacked = combine(&big, &offsets, &opts).unwrap();

    // A single row, stacked on its own with the same offsets, stays below the
    // parallel threshold. Rows far from the top/bottom see the same samples.
    let row = 120;
    for x in 5..295 {
        let column: Vec<PixelBuffer> = big
            .iter()
            .zip(&offsets)
            .map(|(f, o)| {
                let px = f
                    .pixel((x as i32 - o.dx) as usize, (row as i32 - o.dy) as usize)
                    .unwrap();
                PixelBuffer::filled(1, 1, px).unwrap()
            })
            .collect();
        let single = combine(&column, &zeros(column.len()), &opts).unwrap();
        assert_eq!(stacked.image.pixel(x, row), single.image.pixel(0, 0));
    }
}

#[test]
fn test_empty_error() {
    let frames: Vec<PixelBuffer> = vec![];
    let err = combine(&frames, &[], &options(StackMode::Average)).unwrap_err();
    assert!(matches!(err, StackError::EmptySequence));
    assert!(err.is_input_error());
}

#[test]
fn test_dimension_mismatch_error() {
    let frames = vec![common::gray(4, 4, 1), common::gray(4, 5, 1)];
    let err = combine(&frames, &zeros(2), &options(StackMode::Average)).unwrap_err();
    assert!(matches!(
        err,
        StackError::DimensionMismatch {
            index: 1,
            expected: (4, 4),
            actual: (4, 5)
        }
    ));
    assert!(err.is_input_error());
}

#[test]
fn test_offset_count_mismatch_error() {
    let frames = vec![common::gray(4, 4, 1), common::gray(4, 4, 1)];
    let err = combine(&frames, &zeros(1), &options(StackMode::Average)).unwrap_err();
    assert!(matches!(
        err,
        StackError::OffsetCountMismatch {
            frames: 2,
            offsets: 1
        }
    ));
}

#[test]
fn test_non_positive_kappa_rejected() {
    let frames = vec![common::gray(4, 4, 1)];
    let opts = options(StackMode::Average).with_sigma_clip(0.0);
    let err = combine(&frames, &zeros(1), &opts).unwrap_err();
    assert!(matches!(err, StackError::InvalidKappa(_)));
}
