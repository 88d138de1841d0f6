pub mod centroid;
mod dispatcher;
pub mod phase_correlation;

use rayon::prelude::*;

use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::error::Result;
use crate::frame::{uniform_dimensions, AlignmentOffset, PixelBuffer};

pub use centroid::CentroidAligner;
pub use dispatcher::{align_frames, aligner_for};
pub use phase_correlation::PhaseCorrelationAligner;

/// Estimates the translation of each frame relative to a reference frame.
///
/// Offsets use the combiner's convention: output pixel `(x, y)` is read from
/// frame pixel `(x - dx, y - dy)`.
pub trait Aligner: Send + Sync {
    fn name(&self) -> &'static str;

    /// Offset of `target` relative to `reference`.
    fn compute_offset(&self, reference: &PixelBuffer, target: &PixelBuffer)
        -> Result<AlignmentOffset>;

    /// One offset per frame, in input order, relative to `frames[0]`.
    ///
    /// The reference frame's offset is always zero.
    fn align(&self, frames: &[PixelBuffer]) -> Result<Vec<AlignmentOffset>> {
        uniform_dimensions(frames)?;
        let reference = &frames[0];

        let estimate = |(i, frame): (usize, &PixelBuffer)| {
            if i == 0 {
                Ok(AlignmentOffset::ZERO)
            } else {
                self.compute_offset(reference, frame)
            }
        };

        if frames.len() >= PARALLEL_FRAME_THRESHOLD {
            frames.par_iter().enumerate().map(estimate).collect()
        } else {
            frames.iter().enumerate().map(estimate).collect()
        }
    }
}

/// Pass-through aligner: every frame gets a zero offset.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityAligner;

impl Aligner for IdentityAligner {
    fn name(&self) -> &'static str {
        "none"
    }

    fn compute_offset(&self, _: &PixelBuffer, _: &PixelBuffer) -> Result<AlignmentOffset> {
        Ok(AlignmentOffset::ZERO)
    }

    fn align(&self, frames: &[PixelBuffer]) -> Result<Vec<AlignmentOffset>> {
        uniform_dimensions(frames)?;
        Ok(vec![AlignmentOffset::ZERO; frames.len()])
    }
}
