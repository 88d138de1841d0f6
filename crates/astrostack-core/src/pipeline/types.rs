use serde::Serialize;

use crate::frame::{AlignmentOffset, PixelBuffer};
use crate::quality::QualityReport;
use crate::stack::StackMetadata;

/// Stacking stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Validating,
    Alignment,
    Stacking,
    QualityAssessment,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validating => write!(f, "Validating frames"),
            Self::Alignment => write!(f, "Aligning frames"),
            Self::Stacking => write!(f, "Stacking"),
            Self::QualityAssessment => write!(f, "Assessing quality"),
        }
    }
}

/// Everything one stacking invocation hands back to the caller.
#[derive(Clone, Debug, Serialize)]
pub struct StackResponse {
    #[serde(skip)]
    pub image: PixelBuffer,
    pub metadata: StackMetadata,
    pub quality: QualityReport,
    /// Offset applied to each input frame, in input order.
    pub offsets: Vec<AlignmentOffset>,
}

impl StackResponse {
    pub fn frame_count(&self) -> usize {
        self.metadata.frame_count
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.metadata.elapsed_ms
    }

    /// One-line human summary, e.g. "Stacked 8 frames in 41.3ms".
    pub fn status_line(&self) -> String {
        format!(
            "Stacked {} frames in {:.1}ms",
            self.metadata.frame_count, self.metadata.elapsed_ms
        )
    }
}

/// Thread-safe progress reporting for a stacking run.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items in
    /// this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Progress reporter that ignores every event.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
