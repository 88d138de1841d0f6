use crate::consts::EPSILON;

use super::SampleFilter;

/// Keeps every sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoClip;

impl SampleFilter for NoClip {
    #[inline]
    fn retain(&self, samples: &mut [f32]) -> usize {
        samples.len()
    }
}

/// Single-pass sigma clipping.
///
/// Computes the mean and population standard deviation of the samples and
/// drops any sample further than `kappa * stddev` from the mean. If that would
/// drop every sample the set is left untouched.
#[derive(Clone, Copy, Debug)]
pub struct SigmaClip {
    pub kappa: f64,
}

impl SigmaClip {
    pub fn new(kappa: f64) -> Self {
        Self { kappa }
    }
}

impl SampleFilter for SigmaClip {
    fn retain(&self, samples: &mut [f32]) -> usize {
        let n = samples.len();
        if n < 2 {
            return n;
        }

        let (mean, stddev) = mean_stddev(samples);
        if stddev < EPSILON {
            return n;
        }

        let limit = self.kappa * stddev;
        let keep = |v: f32| (v as f64 - mean).abs() <= limit;

        if !samples.iter().any(|&v| keep(v)) {
            return n;
        }

        let mut kept = 0;
        for i in 0..n {
            if keep(samples[i]) {
                samples[kept] = samples[i];
                kept += 1;
            }
        }
        kept
    }
}

/// Mean and population standard deviation.
pub fn mean_stddev(values: &[f32]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let count = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / count;
    let var_sum: f64 = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum();
    (mean, (var_sum / count).sqrt())
}
