use std::sync::Arc;

use tracing::{debug, info};

use crate::align::align_frames;
use crate::error::Result;
use crate::frame::{uniform_dimensions, PixelBuffer};
use crate::quality::assess;
use crate::stack::{check_capacity, combine};

use super::config::StackOptions;
use super::types::{NoOpReporter, PipelineStage, ProgressReporter, StackResponse};

/// Runs align -> combine -> assess for one set of frames.
///
/// Holds no state between calls; each invocation works on its own inputs and
/// allocates its own output.
pub struct StackingService {
    reporter: Arc<dyn ProgressReporter>,
}

impl Default for StackingService {
    fn default() -> Self {
        Self::new()
    }
}

impl StackingService {
    pub fn new() -> Self {
        Self {
            reporter: Arc::new(NoOpReporter),
        }
    }

    pub fn with_reporter(reporter: Arc<dyn ProgressReporter>) -> Self {
        Self { reporter }
    }

    /// Stack `frames` with `options`.
    ///
    /// Shape and option errors are reported before any processing starts;
    /// nothing partial is returned on failure.
    pub fn stack(&self, frames: &[PixelBuffer], options: &StackOptions) -> Result<StackResponse> {
        self.reporter
            .begin_stage(PipelineStage::Validating, Some(frames.len()));
        let (width, height) = uniform_dimensions(frames)?;
        options.validate()?;
        check_capacity(width, height, frames.len())?;
        self.reporter.finish_stage();

        info!(
            frames = frames.len(),
            width,
            height,
            mode = %options.mode,
            alignment = %options.alignment,
            "Stacking frames"
        );

        self.reporter
            .begin_stage(PipelineStage::Alignment, Some(frames.len()));
        let offsets = align_frames(frames, options.alignment)?;
        self.reporter.advance(frames.len());
        self.reporter.finish_stage();

        self.reporter.begin_stage(PipelineStage::Stacking, None);
        let stacked = combine(frames, &offsets, options)?;
        self.reporter.finish_stage();

        self.reporter
            .begin_stage(PipelineStage::QualityAssessment, None);
        let quality = assess(&stacked.image);
        self.reporter.finish_stage();

        debug!(
            snr = quality.snr,
            sharpness = quality.sharpness,
            "Quality assessment complete"
        );

        Ok(StackResponse {
            image: stacked.image,
            metadata: stacked.metadata,
            quality,
            offsets,
        })
    }
}

/// Stack with the default (silent) service.
pub fn stack_frames(frames: &[PixelBuffer], options: &StackOptions) -> Result<StackResponse> {
    StackingService::new().stack(frames, options)
}
