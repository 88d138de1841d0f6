use tracing::debug;

use crate::error::Result;
use crate::frame::{AlignmentOffset, PixelBuffer};
use crate::pipeline::config::AlignmentMode;

use super::{Aligner, CentroidAligner, IdentityAligner, PhaseCorrelationAligner};

/// The aligner implementing `mode`.
pub fn aligner_for(mode: AlignmentMode) -> Box<dyn Aligner> {
    match mode {
        AlignmentMode::Centroid => Box::new(CentroidAligner),
        AlignmentMode::PhaseCorrelation => Box::new(PhaseCorrelationAligner),
        AlignmentMode::None => Box::new(IdentityAligner),
    }
}

/// Compute one offset per frame relative to the first frame.
pub fn align_frames(frames: &[PixelBuffer], mode: AlignmentMode) -> Result<Vec<AlignmentOffset>> {
    let aligner = aligner_for(mode);
    let offsets = aligner.align(frames)?;

    for (i, offset) in offsets.iter().enumerate() {
        debug!(frame = i, dx = offset.dx, dy = offset.dy, method = aligner.name(), "Frame offset");
    }

    Ok(offsets)
}
