use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "slide-picker")]
#[command(about = "Draws random photos, captions them and fills the slideshow folder", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./Config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Draw photos, caption them and write the slideshow files (default)
    Process(ProcessArgs),
    /// Print the caption and GPS status computed for one photo
    Caption {
        photo: PathBuf,
    },
    /// Resolve the nearest city for a coordinate
    Locate {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Default, Args)]
pub struct ProcessArgs {
    /// Log the captions without writing images or sidecars
    #[arg(long)]
    pub dry_run: bool,
}
