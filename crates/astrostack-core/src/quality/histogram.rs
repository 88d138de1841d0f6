use crate::consts::HISTOGRAM_BUCKETS;
use crate::frame::PixelBuffer;

use super::round_to;

/// Fraction of pixels in each of 20 equal-width luminance buckets over
/// [0, 255], each rounded to 3 decimals. Full-white pixels land in the last
/// bucket.
pub fn luminance_histogram(frame: &PixelBuffer) -> Vec<f64> {
    let mut counts = [0usize; HISTOGRAM_BUCKETS];
    for lum in frame.luminance_iter() {
        let bucket = ((lum / 255.0) * HISTOGRAM_BUCKETS as f64).floor() as usize;
        counts[bucket.min(HISTOGRAM_BUCKETS - 1)] += 1;
    }

    let total = frame.pixel_count() as f64;
    counts
        .iter()
        .map(|&count| round_to(count as f64 / total, 3))
        .collect()
}
