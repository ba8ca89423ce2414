use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// prfmap population receptive field model generator.
#[derive(Parser)]
#[command(
    name = "prfmap",
    version,
    about = "Population receptive field (pRF) model time course generator"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate pRF model time courses for the full parameter grid.
    Generate(GenerateArgs),
    /// Convolve pixel-wise stimulus time courses with the HRF only.
    Convolve(ConvolveArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "prfmap.toml")]
    pub config: PathBuf,

    /// Override output NIfTI path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the number of parallel chunks from config.
    #[arg(short = 'j', long)]
    pub chunks: Option<usize>,
}

/// Arguments for the `convolve` subcommand.
#[derive(clap::Args)]
pub struct ConvolveArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "prfmap.toml")]
    pub config: PathBuf,

    /// Path for the convolved stimulus NIfTI output.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override the number of parallel chunks from config.
    #[arg(short = 'j', long)]
    pub chunks: Option<usize>,
}
