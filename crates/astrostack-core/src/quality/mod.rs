pub mod histogram;
pub mod sharpness;
pub mod snr;

use serde::Serialize;

use crate::frame::PixelBuffer;

pub use histogram::luminance_histogram;
pub use sharpness::sharpness;
pub use snr::snr_db;

/// Summary quality figures for one image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityReport {
    /// Luminance signal-to-noise ratio in decibels.
    pub snr: f64,
    /// Edge-energy heuristic; higher means more fine detail.
    pub sharpness: f64,
    /// Fraction of pixels per luminance bucket.
    pub histogram: Vec<f64>,
}

/// Run every quality metric over `frame`.
pub fn assess(frame: &PixelBuffer) -> QualityReport {
    QualityReport {
        snr: snr_db(frame),
        sharpness: sharpness(frame),
        histogram: luminance_histogram(frame),
    }
}

/// Round to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
