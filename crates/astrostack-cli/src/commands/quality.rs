use std::path::PathBuf;

use anyhow::{Context, Result};
use astrostack_core::io::image_io::load_frame;
use astrostack_core::quality::assess;
use clap::Args;

use crate::summary::print_quality;

#[derive(Args)]
pub struct QualityArgs {
    /// Input image file
    pub file: PathBuf,

    /// Downsize images wider than this before measuring
    #[arg(long)]
    pub max_width: Option<u32>,
}

pub fn run(args: &QualityArgs) -> Result<()> {
    let frame = load_frame(&args.file, args.max_width)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    println!(
        "{} ({}x{})",
        args.file.display(),
        frame.width(),
        frame.height()
    );
    print_quality(&assess(&frame));
    Ok(())
}
