use ndarray::Array2;
use num_complex::Complex;
use rayon::prelude::*;
use rustfft::FftPlanner;

use crate::consts::{EPSILON, PARALLEL_FRAME_THRESHOLD};
use crate::error::{Result, StackError};
use crate::frame::{uniform_dimensions, AlignmentOffset, PixelBuffer};

use super::Aligner;

/// FFT phase correlation on the luminance plane.
///
/// Higher fidelity than the centroid for textured fields: it matches the
/// whole frame structure rather than its center of mass. Integer precision.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhaseCorrelationAligner;

impl Aligner for PhaseCorrelationAligner {
    fn name(&self) -> &'static str {
        "phase-correlation"
    }

    fn compute_offset(
        &self,
        reference: &PixelBuffer,
        target: &PixelBuffer,
    ) -> Result<AlignmentOffset> {
        compute_offset_array(&reference.luminance(), &target.luminance())
    }

    /// Transforms the reference once and correlates every frame against it.
    fn align(&self, frames: &[PixelBuffer]) -> Result<Vec<AlignmentOffset>> {
        uniform_dimensions(frames)?;
        let reference = ReferenceSpectrum::new(&frames[0].luminance());

        let estimate = |(i, frame): (usize, &PixelBuffer)| {
            if i == 0 {
                Ok(AlignmentOffset::ZERO)
            } else {
                reference.offset_of(&frame.luminance())
            }
        };

        if frames.len() >= PARALLEL_FRAME_THRESHOLD {
            frames.par_iter().enumerate().map(estimate).collect()
        } else {
            frames.iter().enumerate().map(estimate).collect()
        }
    }
}

/// Translation of `target` relative to `reference`, as the shift that maps
/// target content back onto the reference.
pub fn compute_offset_array(
    reference: &Array2<f64>,
    target: &Array2<f64>,
) -> Result<AlignmentOffset> {
    ReferenceSpectrum::new(reference).offset_of(target)
}

/// Windowed spectrum of the reference plane, reused across targets.
struct ReferenceSpectrum {
    spectrum: Array2<Complex<f64>>,
}

impl ReferenceSpectrum {
    fn new(reference: &Array2<f64>) -> Self {
        // Hann window reduces spectral leakage from the frame edges
        Self {
            spectrum: fft2d(&apply_hann(reference)),
        }
    }

    fn offset_of(&self, target: &Array2<f64>) -> Result<AlignmentOffset> {
        let (h, w) = self.spectrum.dim();
        let (th, tw) = target.dim();
        if h != th || w != tw {
            return Err(StackError::DimensionMismatch {
                index: 1,
                expected: (w, h),
                actual: (tw, th),
            });
        }

        let tgt_fft = fft2d(&apply_hann(target));
        let correlation = ifft2d(&normalized_cross_power(&self.spectrum, &tgt_fft));

        let (peak_row, peak_col, peak_val) = find_peak(&correlation);
        if peak_val <= EPSILON {
            // Flat frame: no spectral energy to correlate
            return Ok(AlignmentOffset::ZERO);
        }

        // Peaks past the midpoint are negative shifts (wrap-around)
        let dy = if peak_row > h / 2 {
            peak_row as f64 - h as f64
        } else {
            peak_row as f64
        };
        let dx = if peak_col > w / 2 {
            peak_col as f64 - w as f64
        } else {
            peak_col as f64
        };

        Ok(AlignmentOffset::from_subpixel(dx, dy))
    }
}

fn apply_hann(data: &Array2<f64>) -> Array2<f64> {
    let (h, w) = data.dim();
    let window = |i: usize, n: usize| {
        if n < 2 {
            1.0
        } else {
            0.5 * (1.0 - (std::f64::consts::TAU * i as f64 / n as f64).cos())
        }
    };
    Array2::from_shape_fn((h, w), |(row, col)| {
        data[[row, col]] * window(row, h) * window(col, w)
    })
}

/// 2D FFT: row-wise FFT, then column-wise FFT.
fn fft2d(data: &Array2<f64>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft_forward(w);
    let fft_col = planner.plan_fft_forward(h);

    let mut result = data.mapv(|v| Complex::new(v, 0.0));

    for mut row in result.rows_mut() {
        let mut buf: Vec<Complex<f64>> = row.to_vec();
        fft_row.process(&mut buf);
        row.assign(&ndarray::ArrayView1::from(&buf[..]));
    }

    for mut col in result.columns_mut() {
        let mut buf: Vec<Complex<f64>> = col.to_vec();
        fft_col.process(&mut buf);
        col.assign(&ndarray::ArrayView1::from(&buf[..]));
    }

    result
}

/// Inverse 2D FFT, real part, normalized by the element count.
fn ifft2d(data: &Array2<Complex<f64>>) -> Array2<f64> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let ifft_row = planner.plan_fft_inverse(w);
    let ifft_col = planner.plan_fft_inverse(h);

    let mut work = data.clone();

    for mut col in work.columns_mut() {
        let mut buf: Vec<Complex<f64>> = col.to_vec();
        ifft_col.process(&mut buf);
        col.assign(&ndarray::ArrayView1::from(&buf[..]));
    }

    for mut row in work.rows_mut() {
        let mut buf: Vec<Complex<f64>> = row.to_vec();
        ifft_row.process(&mut buf);
        row.assign(&ndarray::ArrayView1::from(&buf[..]));
    }

    let scale = 1.0 / (h * w) as f64;
    work.mapv(|c| c.re * scale)
}

fn normalized_cross_power(
    ref_fft: &Array2<Complex<f64>>,
    tgt_fft: &Array2<Complex<f64>>,
) -> Array2<Complex<f64>> {
    let mut result = ref_fft * &tgt_fft.mapv(|c| c.conj());
    result.mapv_inplace(|cross| {
        let mag = cross.norm();
        if mag > 1e-12 {
            cross / mag
        } else {
            Complex::new(0.0, 0.0)
        }
    });
    result
}

fn find_peak(data: &Array2<f64>) -> (usize, usize, f64) {
    let mut best = (0, 0, f64::NEG_INFINITY);
    for ((row, col), &v) in data.indexed_iter() {
        if v > best.2 {
            best = (row, col, v);
        }
    }
    best
}
