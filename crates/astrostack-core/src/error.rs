use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("Empty frame sequence")]
    EmptySequence,

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Sample buffer length {actual} does not match dimensions (expected {expected})")]
    InvalidBufferLength { expected: usize, actual: usize },

    #[error(
        "Frame {index} is {}x{}, expected {}x{}",
        actual.0, actual.1, expected.0, expected.1
    )]
    DimensionMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Got {offsets} offsets for {frames} frames")]
    OffsetCountMismatch { frames: usize, offsets: usize },

    #[error("Sigma-clip kappa must be positive, got {0}")]
    InvalidKappa(f64),

    #[error("Stack of {requested} samples exceeds capacity limit of {limit}")]
    CapacityExceeded { requested: u64, limit: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),
}

impl StackError {
    /// True for errors caused by the shape or options of the caller's input,
    /// as opposed to I/O or capacity failures.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptySequence
                | Self::InvalidDimensions { .. }
                | Self::InvalidBufferLength { .. }
                | Self::DimensionMismatch { .. }
                | Self::OffsetCountMismatch { .. }
                | Self::InvalidKappa(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StackError>;
