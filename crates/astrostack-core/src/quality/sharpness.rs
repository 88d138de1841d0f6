use crate::consts::{CHANNELS, SHARPNESS_SCALE};
use crate::frame::PixelBuffer;

use super::round_to;

/// Edge-energy sharpness heuristic, rounded to 2 decimals.
///
/// For every interior pixel, sums `|c - right| + |c - down|` on the red
/// channel and divides by the sum of the center samples, scaled by 12. This
/// is not a calibrated MTF measurement; it only orders images by how much
/// pixel-to-pixel contrast they carry. Green/blue channels and diagonal
/// neighbours are ignored so results stay comparable with earlier reports.
/// Returns 0 for an image with no red signal in its interior.
pub fn sharpness(frame: &PixelBuffer) -> f64 {
    let (w, h) = frame.dimensions();
    if w < 3 || h < 3 {
        return 0.0;
    }

    let data = frame.samples();
    let stride = w * CHANNELS;
    let mut edges = 0u64;
    let mut total = 0u64;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = frame.offset_of(x, y);
            let center = data[idx];
            let right = data[idx + CHANNELS];
            let down = data[idx + stride];
            edges += center.abs_diff(right) as u64 + center.abs_diff(down) as u64;
            total += center as u64;
        }
    }

    if total == 0 {
        return 0.0;
    }
    round_to(edges as f64 / total as f64 * SHARPNESS_SCALE, 2)
}
