pub mod combiner;
pub mod mean;
pub mod median;
pub mod sigma_clip;

pub use combiner::{check_capacity, combine, StackMetadata, StackResult};
pub use mean::MeanReducer;
pub use median::MedianReducer;
pub use sigma_clip::{NoClip, SigmaClip};

/// Reduces one pixel's surviving samples to a single value.
///
/// Implementations may reorder `samples`. Never called with an empty slice.
pub trait Reducer: Sync {
    fn reduce(&self, samples: &mut [f32]) -> f64;
}

/// Rejects outliers from one pixel's sample set before reduction.
///
/// Survivors are compacted to the front of `samples`; returns their count,
/// which is always at least 1 for a non-empty input.
pub trait SampleFilter: Sync {
    fn retain(&self, samples: &mut [f32]) -> usize;
}

/// Round half away from zero and clamp to the 8-bit sample range.
#[inline]
pub fn to_sample(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
