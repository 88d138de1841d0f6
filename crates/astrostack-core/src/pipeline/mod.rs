pub mod config;
mod service;
mod types;

pub use service::{stack_frames, StackingService};
pub use types::{NoOpReporter, PipelineStage, ProgressReporter, StackResponse};
