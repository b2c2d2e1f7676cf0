// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use retrocam::{FacingMode, FilterType};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "retrocam")]
#[command(about = "Disposable camera: a roll of exposures, vintage filters, instant snapshots")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available filters
    Filters,

    /// Take photos using an image file as the camera
    Snap {
        /// Image served as the live camera frame
        #[arg(short, long)]
        input: PathBuf,

        /// Filter to apply (see 'retrocam filters')
        #[arg(short, long)]
        filter: Option<FilterType>,

        /// Camera direction (front photos are mirrored)
        #[arg(long)]
        facing: Option<FacingMode>,

        /// Number of photos to take (bounded by remaining exposures)
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,

        /// Output directory (default: ~/Pictures/retrocam)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=retrocam=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filters => cli::list_filters(),
        Commands::Snap {
            input,
            filter,
            facing,
            count,
            output,
            config,
        } => cli::snap(cli::SnapOptions {
            input,
            filter,
            facing,
            count,
            output,
            config,
        }),
    }
}
