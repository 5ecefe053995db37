//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// cueprep - DJ cue point preparation from ML audio analysis
///
/// Applies deterministic post-processing to captured analyzer output:
/// EDM section labels with bar counts, beat-aligned boundaries, Camelot key
/// notation, and optional cue point persistence into a VirtualDJ database.
#[derive(Parser, Debug)]
#[command(name = "cueprep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Audio file the analysis belongs to (keys the VDJ database entry)
    #[arg(short, long, value_name = "FILE")]
    pub audio: PathBuf,

    /// Raw analysis JSON captured from the analyzer service
    #[arg(short, long, value_name = "FILE")]
    pub raw: PathBuf,

    /// VirtualDJ database.xml to merge cue points into
    #[arg(long, value_name = "FILE")]
    pub vdj_db: Option<PathBuf>,

    /// Maximum number of cue points to write
    #[arg(long, default_value = "8", value_name = "N")]
    pub max_cues: usize,

    /// Write the post-processed result JSON to this path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Drum-stem RMS threshold for classifying drops
    #[arg(long, value_name = "RMS")]
    pub drums_threshold: Option<f64>,

    /// Bass-stem RMS threshold for classifying drops
    #[arg(long, value_name = "RMS")]
    pub bass_threshold: Option<f64>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}
