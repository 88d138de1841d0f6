//! Synthetic star-field frames for demos and tests.
//!
//! Every frame of a dataset shares one star field; frames differ only in
//! sensor noise, the drift of the faint arcs, and a small integer jitter
//! `(round(sin(i) * 3), round(cos(0.8 * i) * 3))`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::OPAQUE;
use crate::error::{Result, StackError};
use crate::frame::PixelBuffer;

/// Night-sky background, #020617.
const BACKGROUND: [f32; 3] = [2.0, 6.0, 23.0];

/// Nebula band gradient stops: (position, rgb, alpha).
const NEBULA_STOPS: [(f32, [f32; 3], f32); 3] = [
    (0.0, [76.0, 29.0, 149.0], 0.12),
    (0.5, [59.0, 130.0, 246.0], 0.17),
    (1.0, [14.0, 116.0, 144.0], 0.10),
];

const ARC_COLOR: [f32; 3] = [99.0, 102.0, 241.0];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    /// Peak-to-peak amplitude of the per-sample uniform noise.
    pub noise_amplitude: f32,
    /// Maximum jitter in pixels along each axis.
    pub jitter: f32,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 640,
            seed: 0x5EED,
            noise_amplitude: 18.0,
            jitter: 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Star {
    x: f32,
    y: f32,
    radius: f32,
    intensity: f32,
}

/// Generate `count` jittered frames of the same star field.
pub fn generate_dataset(count: usize, config: &SyntheticConfig) -> Result<Vec<PixelBuffer>> {
    let stars = star_field(config);
    debug!(count, stars = stars.len(), "Generating synthetic dataset");
    (0..count)
        .map(|index| render_frame(&stars, index, config))
        .collect()
}

/// Generate frame `index` of the dataset described by `config`.
pub fn generate_frame(index: usize, config: &SyntheticConfig) -> Result<PixelBuffer> {
    render_frame(&star_field(config), index, config)
}

/// Integer jitter `(dx, dy)` applied to frame `index`.
pub fn frame_jitter(index: usize, config: &SyntheticConfig) -> (i32, i32) {
    let i = index as f32;
    (
        (i.sin() * config.jitter).round() as i32,
        ((i * 0.8).cos() * config.jitter).round() as i32,
    )
}

fn star_field(config: &SyntheticConfig) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let (w, h) = (config.width as f32, config.height as f32);
    let count = 120 + rng.random_range(0..=40usize);

    (0..count)
        .map(|_| {
            let x = rng.random::<f32>() * w;
            let y = rng.random::<f32>() * h * 0.8 + h * 0.1;
            let magnitude = rng.random::<f32>() * 2.0 + 0.4;
            let intensity = 1.0 - rng.random::<f32>() * 0.2;
            Star {
                x,
                y,
                radius: magnitude * 1.3,
                intensity,
            }
        })
        .collect()
}

fn render_frame(stars: &[Star], index: usize, config: &SyntheticConfig) -> Result<PixelBuffer> {
    let (w, h) = (config.width, config.height);
    if w == 0 || h == 0 {
        return Err(StackError::InvalidDimensions {
            width: w,
            height: h,
        });
    }
    let frame_seed = config.seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9);
    let mut rng = StdRng::seed_from_u64(frame_seed);

    let mut canvas: Vec<[f32; 3]> = vec![BACKGROUND; w * h];

    for star in stars {
        draw_star(&mut canvas, w, h, star);
    }
    draw_nebula(&mut canvas, w, h);
    draw_arcs(&mut canvas, w, h, index, &mut rng);

    let half = config.noise_amplitude / 2.0;
    for px in canvas.iter_mut() {
        let noise = (rng.random::<f32>() * 2.0 - 1.0) * half;
        for v in px.iter_mut() {
            *v = (*v + noise).clamp(0.0, 255.0);
        }
    }

    let (jx, jy) = frame_jitter(index, config);
    PixelBuffer::from_fn(w, h, |x, y| {
        let sx = x as i64 - jx as i64;
        let sy = y as i64 - jy as i64;
        let rgb = if sx >= 0 && sy >= 0 && (sx as usize) < w && (sy as usize) < h {
            canvas[sy as usize * w + sx as usize]
        } else {
            BACKGROUND
        };
        [rgb[0] as u8, rgb[1] as u8, rgb[2] as u8, OPAQUE]
    })
}

fn blend(dst: &mut [f32; 3], src: [f32; 3], alpha: f32) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d = *d * (1.0 - alpha) + s * alpha;
    }
}

/// Radial glow fading linearly from 75% opacity at the center to nothing at
/// `radius`.
fn draw_star(canvas: &mut [[f32; 3]], w: usize, h: usize, star: &Star) {
    let color = [255.0 * star.intensity, 230.0 * star.intensity, 255.0];
    let x0 = (star.x - star.radius).floor().max(0.0) as usize;
    let y0 = (star.y - star.radius).floor().max(0.0) as usize;
    let x1 = ((star.x + star.radius).ceil() as usize).min(w.saturating_sub(1));
    let y1 = ((star.y + star.radius).ceil() as usize).min(h.saturating_sub(1));

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - star.x;
            let dy = y as f32 + 0.5 - star.y;
            let r = (dx * dx + dy * dy).sqrt();
            if r < star.radius {
                blend(&mut canvas[y * w + x], color, 0.75 * (1.0 - r / star.radius));
            }
        }
    }
}

/// Diagonal gradient band over the lower 60% of the frame.
fn draw_nebula(canvas: &mut [[f32; 3]], w: usize, h: usize) {
    let top = (h as f32 * 0.4) as usize;
    for y in top..h {
        for x in 0..w {
            // Gradient runs from the bottom-left corner to the top-right
            let t = (x as f32 / w as f32 + (1.0 - y as f32 / h as f32)) / 2.0;
            let (color, alpha) = nebula_color(t);
            blend(&mut canvas[y * w + x], color, alpha);
        }
    }
}

fn nebula_color(t: f32) -> ([f32; 3], f32) {
    let t = t.clamp(0.0, 1.0);
    let (lo, hi) = if t <= NEBULA_STOPS[1].0 {
        (NEBULA_STOPS[0], NEBULA_STOPS[1])
    } else {
        (NEBULA_STOPS[1], NEBULA_STOPS[2])
    };
    let f = (t - lo.0) / (hi.0 - lo.0);
    let mix = |a: f32, b: f32| a + (b - a) * f;
    (
        [mix(lo.1[0], hi.1[0]), mix(lo.1[1], hi.1[1]), mix(lo.1[2], hi.1[2])],
        mix(lo.2, hi.2),
    )
}

/// Three faint additive sine arcs whose phase drifts with the frame index.
fn draw_arcs(canvas: &mut [[f32; 3]], w: usize, h: usize, index: usize, rng: &mut StdRng) {
    for row in 0..3 {
        let alpha = 0.12 + row as f32 * 0.05;
        let base = h as f32 * (0.2 + row as f32 * 0.15);
        for x in 0..w {
            let phase = (x as f32 / w as f32) * std::f32::consts::TAU
                + row as f32
                + index as f32 * 0.4;
            let center = base + phase.sin() * 18.0 + rng.random::<f32>() * 8.0;
            let y0 = (center - 1.2).round().max(0.0) as usize;
            let y1 = ((center + 1.2).round() as usize).min(h.saturating_sub(1));
            for y in y0..=y1 {
                let px = &mut canvas[y * w + x];
                for (v, c) in px.iter_mut().zip(ARC_COLOR) {
                    *v = (*v + c * alpha).min(255.0);
                }
            }
        }
    }
}
