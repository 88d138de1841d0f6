use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::consts::{
    CHANNELS, COLOR_CHANNEL_COUNT, MAX_STACK_SAMPLES, OPAQUE, PARALLEL_PIXEL_THRESHOLD,
};
use crate::error::{Result, StackError};
use crate::frame::{uniform_dimensions, AlignmentOffset, PixelBuffer};
use crate::pipeline::config::{StackMode, StackOptions};

use super::{to_sample, MeanReducer, MedianReducer, NoClip, Reducer, SampleFilter, SigmaClip};

/// Combined image plus run metadata.
#[derive(Clone, Debug)]
pub struct StackResult {
    pub image: PixelBuffer,
    pub metadata: StackMetadata,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackMetadata {
    /// Number of input frames combined.
    pub frame_count: usize,
    /// Wall-clock duration of the per-pixel combination loop only.
    pub elapsed_ms: f64,
}

/// Combine aligned frames into one image.
///
/// For every output pixel and color channel, gathers the sample at
/// `(x - dx, y - dy)` from each frame (frames shifted out of bounds do not
/// contribute), optionally sigma-clips the set, then reduces it with the
/// configured statistic. Output alpha is opaque, or 0 where no frame covers
/// the pixel. Inputs are never modified.
pub fn combine(
    frames: &[PixelBuffer],
    offsets: &[AlignmentOffset],
    options: &StackOptions,
) -> Result<StackResult> {
    let (width, height) = uniform_dimensions(frames)?;
    if frames.len() != offsets.len() {
        return Err(StackError::OffsetCountMismatch {
            frames: frames.len(),
            offsets: offsets.len(),
        });
    }
    options.validate()?;

    check_capacity(width, height, frames.len())?;

    let layout = StackLayout {
        frames,
        offsets,
        width,
        height,
    };

    // Strategy is picked once; the pixel loop is monomorphized per pair.
    let start = Instant::now();
    let samples = match options.mode {
        StackMode::Average => with_filter(&layout, &MeanReducer, options.active_kappa()),
        StackMode::Median => with_filter(&layout, &MedianReducer, options.active_kappa()),
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    info!(
        frames = frames.len(),
        width,
        height,
        mode = %options.mode,
        sigma_clip = ?options.active_kappa(),
        elapsed_ms,
        "Combined frames"
    );

    Ok(StackResult {
        image: PixelBuffer::from_raw(width, height, samples)?,
        metadata: StackMetadata {
            frame_count: frames.len(),
            elapsed_ms,
        },
    })
}

/// Reject stacks whose `width * height * frame_count` exceeds
/// [`MAX_STACK_SAMPLES`].
pub fn check_capacity(width: usize, height: usize, frame_count: usize) -> Result<()> {
    let requested = (width as u64) * (height as u64) * frame_count as u64;
    if requested > MAX_STACK_SAMPLES {
        return Err(StackError::CapacityExceeded {
            requested,
            limit: MAX_STACK_SAMPLES,
        });
    }
    Ok(())
}

struct StackLayout<'a> {
    frames: &'a [PixelBuffer],
    offsets: &'a [AlignmentOffset],
    width: usize,
    height: usize,
}

fn with_filter<R: Reducer>(layout: &StackLayout<'_>, reducer: &R, kappa: Option<f64>) -> Vec<u8> {
    match kappa {
        Some(kappa) => combine_frames(layout, &SigmaClip::new(kappa), reducer),
        None => combine_frames(layout, &NoClip, reducer),
    }
}

/// Per-task scratch space, sized to the frame count once.
struct Scratch {
    /// Sample index of the source pixel in each contributing frame.
    sources: Vec<(usize, usize)>,
    values: Vec<f32>,
}

impl Scratch {
    fn new(frame_count: usize) -> Self {
        Self {
            sources: Vec::with_capacity(frame_count),
            values: Vec::with_capacity(frame_count),
        }
    }
}

fn combine_frames<F: SampleFilter, R: Reducer>(
    layout: &StackLayout<'_>,
    filter: &F,
    reducer: &R,
) -> Vec<u8> {
    let row_len = layout.width * CHANNELS;
    let mut out = vec![0u8; row_len * layout.height];
    let n = layout.frames.len();

    if layout.width * layout.height >= PARALLEL_PIXEL_THRESHOLD && n > 1 {
        debug!(rows = layout.height, "Row-parallel combination");
        out.par_chunks_mut(row_len).enumerate().for_each_init(
            || Scratch::new(n),
            |scratch, (row, row_out)| combine_row(layout, filter, reducer, row, row_out, scratch),
        );
    } else {
        let mut scratch = Scratch::new(n);
        for (row, row_out) in out.chunks_mut(row_len).enumerate() {
            combine_row(layout, filter, reducer, row, row_out, &mut scratch);
        }
    }

    out
}

fn combine_row<F: SampleFilter, R: Reducer>(
    layout: &StackLayout<'_>,
    filter: &F,
    reducer: &R,
    row: usize,
    row_out: &mut [u8],
    scratch: &mut Scratch,
) {
    let (w, h) = (layout.width as i64, layout.height as i64);

    for (col, dst) in row_out.chunks_exact_mut(CHANNELS).enumerate() {
        scratch.sources.clear();
        for (i, (frame, offset)) in layout.frames.iter().zip(layout.offsets).enumerate() {
            let sx = col as i64 - offset.dx as i64;
            let sy = row as i64 - offset.dy as i64;
            if sx >= 0 && sx < w && sy >= 0 && sy < h {
                scratch
                    .sources
                    .push((i, frame.offset_of(sx as usize, sy as usize)));
            }
        }

        if scratch.sources.is_empty() {
            dst.fill(0);
            continue;
        }

        for (c, out) in dst.iter_mut().take(COLOR_CHANNEL_COUNT).enumerate() {
            scratch.values.clear();
            scratch.values.extend(
                scratch
                    .sources
                    .iter()
                    .map(|&(i, idx)| layout.frames[i].samples()[idx + c] as f32),
            );
            let kept = filter.retain(&mut scratch.values);
            *out = to_sample(reducer.reduce(&mut scratch.values[..kept]));
        }
        dst[COLOR_CHANNEL_COUNT] = OPAQUE;
    }
}
