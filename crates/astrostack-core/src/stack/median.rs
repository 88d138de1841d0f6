use super::Reducer;

/// Statistical median; the mean of the two middle values for an even count.
///
/// Uses `select_nth_unstable` for O(n) selection without a full sort.
#[derive(Clone, Copy, Debug, Default)]
pub struct MedianReducer;

impl Reducer for MedianReducer {
    #[inline]
    fn reduce(&self, samples: &mut [f32]) -> f64 {
        compute_median(samples)
    }
}

fn compute_median(values: &mut [f32]) -> f64 {
    let n = values.len();
    if n == 1 {
        return values[0] as f64;
    }

    let mid = n / 2;
    let upper = *values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b)).1 as f64;
    if n % 2 == 1 {
        upper
    } else {
        // Everything left of `mid` is <= upper; the lower middle is their max
        let lower = values[..mid]
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max) as f64;
        (lower + upper) / 2.0
    }
}
