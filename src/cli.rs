use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an SRT file to another caption format
    Convert {
        /// Input SRT file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (defaults to the input path with the target extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target format: srt, vtt, txt, sbv, ttml
        #[arg(short, long)]
        format: Option<String>,

        /// Fail on malformed blocks instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Convert every SRT file in a directory
    Batch {
        /// Input directory containing SRT files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Target format: srt, vtt, txt, sbv, ttml
        #[arg(short, long)]
        format: Option<String>,

        /// Output directory (mirrors the input layout)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Check a caption file for structural problems
    Validate {
        /// Caption file
        #[arg(short, long)]
        input: PathBuf,

        /// Format to validate as (defaults to the file extension)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Report reading speed, gaps, language and quality of an SRT file
    Analyze {
        /// Input SRT file, or a media file with sidecar captions
        #[arg(short, long)]
        input: PathBuf,

        /// Fail when quality is below this level (excellent, good, fair, poor)
        #[arg(long)]
        min_quality: Option<String>,
    },

    /// Pick the best caption track from a JSON track list
    Tracks {
        /// JSON file containing an array of caption tracks
        #[arg(short, long)]
        input: PathBuf,

        /// Preferred language code
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Only consider these language codes (comma-separated)
        #[arg(long)]
        only: Option<String>,
    },

    /// Write a configuration file with default values
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}
