pub mod align;
pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod quality;
pub mod stack;
pub mod synthetic;

pub use error::{Result, StackError};
pub use frame::{AlignmentOffset, PixelBuffer};
pub use pipeline::config::{AlignmentMode, SigmaClipConfig, StackMode, StackOptions};
pub use pipeline::{stack_frames, StackResponse, StackingService};
