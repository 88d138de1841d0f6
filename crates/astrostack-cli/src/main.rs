mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "astrostack", about = "Astrophotography frame stacking tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align and stack image frames
    Stack(commands::stack::StackArgs),
    /// Report SNR, sharpness and histogram of an image
    Quality(commands::quality::QualityArgs),
    /// Write a synthetic star-field dataset
    Synth(commands::synth::SynthArgs),
    /// Print or save the default stacking options as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Stack(args) => commands::stack::run(args),
        Commands::Quality(args) => commands::quality::run(args),
        Commands::Synth(args) => commands::synth::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
