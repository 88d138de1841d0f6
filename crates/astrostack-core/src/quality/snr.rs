use crate::consts::EPSILON;
use crate::frame::PixelBuffer;

use super::round_to;

/// Luminance signal-to-noise ratio in decibels, rounded to 2 decimals.
///
/// `20 * log10(mean / stddev)` over per-pixel luminance, with the population
/// variance taken in a second pass around the mean. A zero-noise image (every
/// pixel the same luminance) and an all-black image both report 0 rather than
/// an infinity.
pub fn snr_db(frame: &PixelBuffer) -> f64 {
    let mut lums = frame.luminance_iter();
    let Some(first) = lums.next() else {
        return 0.0;
    };
    // Summation error would otherwise leave a tiny variance on flat frames
    if lums.all(|l| l == first) {
        return 0.0;
    }

    let count = frame.pixel_count() as f64;
    let mean = frame.luminance_iter().sum::<f64>() / count;
    let variance = frame
        .luminance_iter()
        .map(|l| {
            let d = l - mean;
            d * d
        })
        .sum::<f64>()
        / count;
    if variance <= EPSILON * mean.max(1.0).powi(2) {
        return 0.0;
    }

    let ratio = mean / variance.sqrt();
    if !(ratio.is_finite() && ratio > 0.0) {
        return 0.0;
    }
    round_to(20.0 * ratio.log10(), 2)
}
