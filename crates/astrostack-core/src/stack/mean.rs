use super::Reducer;

/// Arithmetic mean of the samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeanReducer;

impl Reducer for MeanReducer {
    #[inline]
    fn reduce(&self, samples: &mut [f32]) -> f64 {
        let sum: f64 = samples.iter().map(|&v| v as f64).sum();
        sum / samples.len() as f64
    }
}
