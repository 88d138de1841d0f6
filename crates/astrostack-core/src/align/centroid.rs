//! Centroid (center-of-gravity) alignment.
//!
//! Computes the luminance-weighted center of mass of each whole frame and
//! returns the rounded difference to the reference centroid. This is a coarse
//! whole-field estimate suited to drift or jitter of a few pixels; it does not
//! register star patterns and cannot recover rotation or scale.

use rayon::prelude::*;

use crate::consts::{CHANNELS, EPSILON, PARALLEL_FRAME_THRESHOLD, PARALLEL_PIXEL_THRESHOLD};
use crate::error::Result;
use crate::frame::{luminance, uniform_dimensions, AlignmentOffset, PixelBuffer};

use super::Aligner;

#[derive(Clone, Copy, Debug, Default)]
pub struct CentroidAligner;

impl Aligner for CentroidAligner {
    fn name(&self) -> &'static str {
        "centroid"
    }

    fn compute_offset(
        &self,
        reference: &PixelBuffer,
        target: &PixelBuffer,
    ) -> Result<AlignmentOffset> {
        Ok(offset_between(
            compute_centroid(reference),
            compute_centroid(target),
        ))
    }

    /// Computes every centroid once instead of re-measuring the reference
    /// for each frame.
    fn align(&self, frames: &[PixelBuffer]) -> Result<Vec<AlignmentOffset>> {
        uniform_dimensions(frames)?;

        let centroids: Vec<Option<(f64, f64)>> = if frames.len() >= PARALLEL_FRAME_THRESHOLD {
            frames.par_iter().map(compute_centroid).collect()
        } else {
            frames.iter().map(compute_centroid).collect()
        };

        let reference = centroids[0];
        Ok(centroids
            .into_iter()
            .enumerate()
            .map(|(i, c)| {
                if i == 0 {
                    AlignmentOffset::ZERO
                } else {
                    offset_between(reference, c)
                }
            })
            .collect())
    }
}

/// Rounded `reference - target`, or zero when either centroid is undefined.
fn offset_between(reference: Option<(f64, f64)>, target: Option<(f64, f64)>) -> AlignmentOffset {
    match (reference, target) {
        (Some((rx, ry)), Some((tx, ty))) => AlignmentOffset::from_subpixel(rx - tx, ry - ty),
        _ => AlignmentOffset::ZERO,
    }
}

/// Luminance-weighted centroid `(x, y)` of a frame.
///
/// Returns `None` for a frame whose total luminance is effectively zero.
pub fn compute_centroid(frame: &PixelBuffer) -> Option<(f64, f64)> {
    let (sum_x, sum_y, sum_w) = if frame.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
        (0..frame.height())
            .into_par_iter()
            .map(|row| row_moments(frame, row))
            .reduce(
                || (0.0, 0.0, 0.0),
                |(ax, ay, aw), (x, y, w)| (ax + x, ay + y, aw + w),
            )
    } else {
        (0..frame.height())
            .map(|row| row_moments(frame, row))
            .fold((0.0, 0.0, 0.0), |(ax, ay, aw), (x, y, w)| {
                (ax + x, ay + y, aw + w)
            })
    };

    if sum_w > EPSILON {
        Some((sum_x / sum_w, sum_y / sum_w))
    } else {
        None
    }
}

/// First moments of one row: (Σ l·x, Σ l·y, Σ l).
fn row_moments(frame: &PixelBuffer, row: usize) -> (f64, f64, f64) {
    let start = frame.offset_of(0, row);
    let end = start + frame.width() * CHANNELS;

    let mut sum_x = 0.0f64;
    let mut sum_w = 0.0f64;
    for (col, px) in frame.samples()[start..end].chunks_exact(CHANNELS).enumerate() {
        let weight = luminance(px[0], px[1], px[2]);
        sum_x += col as f64 * weight;
        sum_w += weight;
    }
    (sum_x, row as f64 * sum_w, sum_w)
}
