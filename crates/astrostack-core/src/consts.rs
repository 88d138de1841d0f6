/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// ITU-R BT.709 luminance coefficient for the red channel.
pub const LUMINANCE_R: f64 = 0.2126;

/// ITU-R BT.709 luminance coefficient for the green channel.
pub const LUMINANCE_G: f64 = 0.7152;

/// ITU-R BT.709 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f64 = 0.0722;

/// Samples per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Color channels combined by the stacker. Alpha is written, not combined.
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Fully opaque alpha value written into combined output.
pub const OPAQUE: u8 = 255;

/// Number of equal-width luminance buckets in the quality histogram.
pub const HISTOGRAM_BUCKETS: usize = 20;

/// Default sigma-clip rejection threshold, in standard deviations.
pub const DEFAULT_KAPPA: f64 = 2.2;

/// Scale factor applied to the edge/total ratio in the sharpness heuristic.
pub const SHARPNESS_SCALE: f64 = 12.0;

/// Upper bound on width * height * frame_count accepted by the combiner.
/// The per-pixel sample set grows with frame count, so very deep stacks of
/// large frames are rejected up front.
pub const MAX_STACK_SAMPLES: u64 = 1 << 32;

/// Default maximum width when importing frames from image files.
pub const DEFAULT_IMPORT_WIDTH: u32 = 1280;
