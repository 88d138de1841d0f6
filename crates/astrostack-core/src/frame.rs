use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{CHANNELS, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::{Result, StackError};

/// A fixed-size RGBA8 image.
///
/// Samples are row-major, four per pixel in R, G, B, A order. Buffers are
/// immutable once constructed; the stacker always allocates fresh output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA samples, checking that the length matches the dimensions.
    pub fn from_raw(width: usize, height: usize, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StackError::InvalidDimensions { width, height });
        }
        let expected = width * height * CHANNELS;
        if samples.len() != expected {
            return Err(StackError::InvalidBufferLength {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A buffer where every pixel has the same RGBA value.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self> {
        let samples = rgba
            .iter()
            .copied()
            .cycle()
            .take(width * height * CHANNELS)
            .collect();
        Self::from_raw(width, height, samples)
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> [u8; 4],
    ) -> Result<Self> {
        let mut samples = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&f(x, y));
            }
        }
        Self::from_raw(width, height, samples)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Raw RGBA sample stream.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Index of the first (red) sample of pixel `(x, y)`.
    #[inline]
    pub fn offset_of(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    /// RGBA value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset_of(x, y);
        Some([
            self.samples[i],
            self.samples[i + 1],
            self.samples[i + 2],
            self.samples[i + 3],
        ])
    }

    /// Luminance plane, shape = (height, width).
    pub fn luminance(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.height, self.width), |(row, col)| {
            let i = self.offset_of(col, row);
            luminance(self.samples[i], self.samples[i + 1], self.samples[i + 2])
        })
    }

    /// Iterate over per-pixel luminance in row-major order.
    pub fn luminance_iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples
            .chunks_exact(CHANNELS)
            .map(|px| luminance(px[0], px[1], px[2]))
    }
}

/// Rec. 709 luminance of an RGB triple, in sample units [0, 255].
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    LUMINANCE_R * r as f64 + LUMINANCE_G * g as f64 + LUMINANCE_B * b as f64
}

/// Integer translation of a frame relative to the reference frame.
///
/// The combiner samples frame pixel `(x - dx, y - dy)` for output pixel
/// `(x, y)`, so the offset is "reference position minus frame position".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlignmentOffset {
    pub dx: i32,
    pub dy: i32,
}

impl AlignmentOffset {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Round a fractional displacement to the nearest integer shift.
    pub fn from_subpixel(dx: f64, dy: f64) -> Self {
        let round = |v: f64| {
            if v.is_finite() {
                v.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
            } else {
                0
            }
        };
        Self {
            dx: round(dx),
            dy: round(dy),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl std::fmt::Display for AlignmentOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:+}, {:+})", self.dx, self.dy)
    }
}

/// Check that `frames` is non-empty and every frame shares the first frame's
/// dimensions. Returns `(width, height)`.
pub fn uniform_dimensions(frames: &[PixelBuffer]) -> Result<(usize, usize)> {
    let first = frames.first().ok_or(StackError::EmptySequence)?;
    let expected = first.dimensions();
    for (index, frame) in frames.iter().enumerate().skip(1) {
        let actual = frame.dimensions();
        if actual != expected {
            return Err(StackError::DimensionMismatch {
                index,
                expected,
                actual,
            });
        }
    }
    Ok(expected)
}
