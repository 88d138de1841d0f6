use std::path::PathBuf;

use anyhow::{Context, Result};
use astrostack_core::io::image_io::save_png;
use astrostack_core::synthetic::{generate_dataset, SyntheticConfig};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Args)]
pub struct SynthArgs {
    /// Output directory
    pub dir: PathBuf,

    /// Number of frames to generate
    #[arg(long, default_value = "8")]
    pub count: usize,

    /// Random seed for the star field and noise
    #[arg(long, default_value = "24301")]
    pub seed: u64,

    /// Frame width in pixels
    #[arg(long, default_value = "960")]
    pub width: usize,

    /// Frame height in pixels
    #[arg(long, default_value = "640")]
    pub height: usize,

    /// Peak-to-peak noise amplitude per sample
    #[arg(long, default_value = "18")]
    pub noise: f32,
}

pub fn run(args: &SynthArgs) -> Result<()> {
    let config = SyntheticConfig {
        width: args.width,
        height: args.height,
        seed: args.seed,
        noise_amplitude: args.noise,
        ..SyntheticConfig::default()
    };

    println!("Generating {} synthetic frames...", args.count);
    let frames = generate_dataset(args.count, &config)?;

    std::fs::create_dir_all(&args.dir)
        .with_context(|| format!("Failed to create {}", args.dir.display()))?;

    let pb = ProgressBar::new(frames.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Writing [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    for (i, frame) in frames.iter().enumerate() {
        let path = args.dir.join(format!("synthetic_{:02}.png", i + 1));
        save_png(frame, &path).with_context(|| format!("Failed to write {}", path.display()))?;
        pb.inc(1);
    }
    pb.finish();

    println!("Saved {} frames to {}", frames.len(), args.dir.display());
    Ok(())
}
