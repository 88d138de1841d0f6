//! Image-file adapter for callers that start from files on disk.
//!
//! The stacking engine itself only deals in [`PixelBuffer`](crate::frame::PixelBuffer)s.

pub mod image_io;
