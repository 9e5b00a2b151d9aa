//! Command-line interface.

use clap::Parser;
use std::path::PathBuf;

/// Replay a recorded perception trace through the gesture engine
#[derive(Parser, Debug)]
#[command(name = "gesto-replay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON-lines trace file
    #[arg(short, long)]
    pub trace: PathBuf,

    /// Engine config JSON file (defaults to GESTO_* environment variables)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use the low-latency preset instead of the default timings
    #[arg(long, conflicts_with = "config")]
    pub responsive: bool,

    /// Pace frames by their recorded timestamps
    #[arg(long)]
    pub realtime: bool,

    /// Playback speed multiplier for --realtime
    #[arg(long, default_value = "1.0")]
    pub speed: f64,

    /// Print Prometheus metrics after the replay
    #[arg(long)]
    pub metrics: bool,

    /// Print a JSON summary instead of the event stream
    #[arg(short, long)]
    pub summary: bool,
}
