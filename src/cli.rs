use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "heic-converter")]
#[command(author, version, about = "Convert HEIC/HEIF images in Stash libraries to JPEG")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as a Stash plugin (JSON input on stdin, JSON result on stdout)
    Plugin,

    /// List HEIC/HEIF files in the Stash libraries without converting
    Scan,

    /// Convert HEIC/HEIF files to JPEG, delete the originals and rescan Stash
    Convert,

    /// Check that ImageMagick is available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
