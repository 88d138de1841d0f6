mod common;

use astrostack_core::align::centroid::compute_centroid;
use astrostack_core::align::phase_correlation::compute_offset_array;
use astrostack_core::align::{
    align_frames, aligner_for, Aligner, CentroidAligner, IdentityAligner, PhaseCorrelationAligner,
};
use astrostack_core::frame::{AlignmentOffset, PixelBuffer};
use astrostack_core::pipeline::config::{AlignmentMode, StackMode, StackOptions};
use astrostack_core::stack::combine;
use astrostack_core::StackError;

// ---------------------------------------------------------------------------
// None
// ---------------------------------------------------------------------------

#[test]
fn test_none_returns_zero_offsets() {
    let frames = vec![
        common::square(32, 32, 4, 4, 5),
        common::square(32, 32, 20, 11, 5),
        common::gray(32, 32, 0),
    ];
    let offsets = align_frames(&frames, AlignmentMode::None).unwrap();
    assert_eq!(offsets, vec![AlignmentOffset::ZERO; 3]);
}

#[test]
fn test_identity_aligner_pairwise() {
    let a = common::square(16, 16, 1, 1, 3);
    let b = common::square(16, 16, 9, 9, 3);
    assert_eq!(
        IdentityAligner.compute_offset(&a, &b).unwrap(),
        AlignmentOffset::ZERO
    );
}

// ---------------------------------------------------------------------------
// Centroid
// ---------------------------------------------------------------------------

#[test]
fn test_centroid_of_square() {
    let frame = common::square(32, 32, 10, 6, 4);
    let (cx, cy) = compute_centroid(&frame).unwrap();
    assert!((cx - 11.5).abs() < 1e-9, "cx={cx}");
    assert!((cy - 7.5).abs() < 1e-9, "cy={cy}");
}

#[test]
fn test_centroid_known_shift() {
    let reference = common::square(32, 32, 10, 10, 4);
    // Moved +3 in x and -2 in y
    let target = common::square(32, 32, 13, 8, 4);
    let offset = CentroidAligner.compute_offset(&reference, &target).unwrap();
    assert_eq!(offset, AlignmentOffset::new(-3, 2));
}

#[test]
fn test_centroid_reference_offset_is_zero() {
    let frames = vec![
        common::square(32, 32, 12, 12, 4),
        common::square(32, 32, 14, 12, 4),
        common::square(32, 32, 12, 15, 4),
    ];
    let offsets = align_frames(&frames, AlignmentMode::Centroid).unwrap();
    assert_eq!(
        offsets,
        vec![
            AlignmentOffset::ZERO,
            AlignmentOffset::new(-2, 0),
            AlignmentOffset::new(0, -3),
        ]
    );
}

#[test]
fn test_centroid_parallel_frames() {
    // >= PARALLEL_FRAME_THRESHOLD frames
    let frames: Vec<PixelBuffer> = (0..6)
        .map(|i| common::square(40, 40, 15 + i, 15, 6))
        .collect();
    let offsets = align_frames(&frames, AlignmentMode::Centroid).unwrap();
    for (i, offset) in offsets.iter().enumerate() {
        assert_eq!(*offset, AlignmentOffset::new(-(i as i32), 0));
    }
}

#[test]
fn test_centroid_black_frame_falls_back_to_zero() {
    let reference = common::square(16, 16, 4, 4, 4);
    let black = common::gray(16, 16, 0);
    let offsets = align_frames(&[reference, black], AlignmentMode::Centroid).unwrap();
    assert_eq!(offsets[1], AlignmentOffset::ZERO);
    assert!(compute_centroid(&common::gray(16, 16, 0)).is_none());
}

#[test]
fn test_centroid_black_reference_falls_back_to_zero() {
    let black = common::gray(16, 16, 0);
    let target = common::square(16, 16, 2, 9, 3);
    let offset = CentroidAligner.compute_offset(&black, &target).unwrap();
    assert_eq!(offset, AlignmentOffset::ZERO);
}

#[test]
fn test_centroid_alignment_restores_reference() {
    let reference = common::square(32, 32, 10, 10, 4);
    let target = common::square(32, 32, 13, 8, 4);
    let frames = vec![reference.clone(), target];

    let offsets = align_frames(&frames, AlignmentMode::Centroid).unwrap();
    let opts = StackOptions::new(StackMode::Average, AlignmentMode::Centroid);
    let result = combine(&frames, &offsets, &opts).unwrap();

    assert_eq!(result.image, reference);
}

// ---------------------------------------------------------------------------
// Phase correlation
// ---------------------------------------------------------------------------

#[test]
fn test_phase_correlation_zero_offset_for_identical_frames() {
    let frame = common::square(32, 32, 10, 10, 10);
    let offset = PhaseCorrelationAligner
        .compute_offset(&frame, &frame)
        .unwrap();
    assert_eq!(offset, AlignmentOffset::ZERO);
}

#[test]
fn test_phase_correlation_known_shift() {
    let reference = common::square(64, 64, 20, 20, 10);
    // Moved +5 in x and +3 in y
    let target = common::square(64, 64, 25, 23, 10);
    let offset = PhaseCorrelationAligner
        .compute_offset(&reference, &target)
        .unwrap();
    assert!((offset.dx + 5).abs() <= 1, "dx={} should be ~-5", offset.dx);
    assert!((offset.dy + 3).abs() <= 1, "dy={} should be ~-3", offset.dy);
}

#[test]
fn test_phase_correlation_black_frames() {
    let black = common::gray(16, 16, 0);
    let offset = PhaseCorrelationAligner
        .compute_offset(&black, &black)
        .unwrap();
    assert_eq!(offset, AlignmentOffset::ZERO);
}

#[test]
fn test_phase_correlation_batch_matches_pairwise() {
    // Enough frames to take the frame-parallel path
    let frames: Vec<PixelBuffer> = [(20, 20), (23, 18), (17, 22), (26, 25), (20, 15)]
        .iter()
        .map(|&(x, y)| common::square(64, 64, x, y, 10))
        .collect();

    let batch = PhaseCorrelationAligner.align(&frames).unwrap();
    assert_eq!(batch.len(), frames.len());
    assert_eq!(batch[0], AlignmentOffset::ZERO);
    for (i, frame) in frames.iter().enumerate().skip(1) {
        let pairwise = PhaseCorrelationAligner
            .compute_offset(&frames[0], frame)
            .unwrap();
        assert_eq!(batch[i], pairwise, "frame {i}");
    }
    assert!((batch[1].dx + 3).abs() <= 1 && (batch[1].dy - 2).abs() <= 1);
}

#[test]
fn test_phase_correlation_array_size_mismatch() {
    let a = common::gray(8, 8, 10).luminance();
    let b = common::gray(8, 9, 10).luminance();
    assert!(compute_offset_array(&a, &b).is_err());
}

// ---------------------------------------------------------------------------
// Dispatch and validation
// ---------------------------------------------------------------------------

#[test]
fn test_aligner_for_names() {
    assert_eq!(aligner_for(AlignmentMode::Centroid).name(), "centroid");
    assert_eq!(
        aligner_for(AlignmentMode::PhaseCorrelation).name(),
        "phase-correlation"
    );
    assert_eq!(aligner_for(AlignmentMode::None).name(), "none");
}

#[test]
fn test_align_empty_error() {
    let err = align_frames(&[], AlignmentMode::Centroid).unwrap_err();
    assert!(matches!(err, StackError::EmptySequence));
}

#[test]
fn test_align_dimension_mismatch_error() {
    let frames = vec![common::gray(8, 8, 10), common::gray(9, 8, 10)];
    for mode in [
        AlignmentMode::None,
        AlignmentMode::Centroid,
        AlignmentMode::PhaseCorrelation,
    ] {
        let err = align_frames(&frames, mode).unwrap_err();
        assert!(matches!(err, StackError::DimensionMismatch { .. }));
    }
}

#[test]
fn test_single_frame_alignment() {
    let frames = vec![common::square(8, 8, 2, 2, 2)];
    for mode in [
        AlignmentMode::None,
        AlignmentMode::Centroid,
        AlignmentMode::PhaseCorrelation,
    ] {
        assert_eq!(align_frames(&frames, mode).unwrap(), vec![AlignmentOffset::ZERO]);
    }
}
