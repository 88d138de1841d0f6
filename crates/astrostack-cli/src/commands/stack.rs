use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use astrostack_core::io::image_io::{load_frame, save_image};
use astrostack_core::pipeline::config::{AlignmentMode, StackMode};
use astrostack_core::{PixelBuffer, StackOptions, StackingService};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::debug;

use crate::progress::BarReporter;
use crate::summary::print_stack_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Average,
    Median,
}

impl From<ModeArg> for StackMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Average => StackMode::Average,
            ModeArg::Median => StackMode::Median,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AlignArg {
    Centroid,
    PhaseCorrelation,
    None,
}

impl From<AlignArg> for AlignmentMode {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Centroid => AlignmentMode::Centroid,
            AlignArg::PhaseCorrelation => AlignmentMode::PhaseCorrelation,
            AlignArg::None => AlignmentMode::None,
        }
    }
}

#[derive(Args)]
pub struct StackArgs {
    /// Input image files; the first one is the alignment reference
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Stacking options file (TOML); flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Combination statistic
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Alignment method
    #[arg(long, value_enum)]
    pub alignment: Option<AlignArg>,

    /// Sigma-clip threshold in standard deviations
    #[arg(long, conflicts_with = "no_clip")]
    pub kappa: Option<f64>,

    /// Disable sigma clipping
    #[arg(long)]
    pub no_clip: bool,

    /// Downsize inputs wider than this many pixels (0 keeps full size)
    #[arg(long, default_value = "1280")]
    pub max_width: u32,

    /// Output file path (.png or .tiff)
    #[arg(short, long, default_value = "stacked.png")]
    pub output: PathBuf,
}

pub fn run(args: &StackArgs) -> Result<()> {
    let options = build_options(args)?;

    let frames = load_frames(&args.files, args.max_width)?;
    if let Some(first) = frames.first() {
        println!(
            "Loaded {} frames ({}x{})",
            frames.len(),
            first.width(),
            first.height()
        );
    }

    let reporter = Arc::new(BarReporter::new()?);
    let service = StackingService::with_reporter(reporter.clone());
    let response = service.stack(&frames, &options)?;
    reporter.finish();

    save_image(&response.image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    print_stack_summary(&options, &response, &args.output);
    Ok(())
}

fn build_options(args: &StackArgs) -> Result<StackOptions> {
    let mut options = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid stacking config")?
    } else {
        StackOptions::default()
    };

    if let Some(mode) = args.mode {
        options.mode = mode.into();
    }
    if let Some(alignment) = args.alignment {
        options.alignment = alignment.into();
    }
    if args.no_clip {
        options = options.without_sigma_clip();
    } else if let Some(kappa) = args.kappa {
        options = options.with_sigma_clip(kappa);
    }

    options.validate()?;
    Ok(options)
}

fn load_frames(files: &[PathBuf], max_width: u32) -> Result<Vec<PixelBuffer>> {
    let max_width = (max_width > 0).then_some(max_width);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Loading [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let frames = files
        .par_iter()
        .map(|path| {
            let frame = load_frame(path, max_width)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            debug!(path = %path.display(), width = frame.width(), height = frame.height(), "Loaded frame");
            pb.inc(1);
            Ok(frame)
        })
        .collect::<Result<Vec<_>>>()?;
    pb.finish();

    Ok(frames)
}
