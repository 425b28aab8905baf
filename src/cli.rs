use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::effects::fade::FadeShape;
use crate::spectral::window::Window;

#[derive(Parser, Debug)]
#[command(name = "sigscope", about = "Time-domain and spectral analysis of PCM audio files")]
pub struct Cli {
    /// Config file (defaults to sigscope.toml or the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Prompt for values not given on the command line instead of using config defaults
    #[arg(short, long, global = true)]
    pub interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print channel count, sample rate, bit depth and duration
    Info {
        /// Input audio file (WAV)
        input: PathBuf,
    },
    /// Normalized per-frame energy
    Energy(FeatureArgs),
    /// Normalized per-frame zero-crossing rate
    Zcr(FeatureArgs),
    /// Energy with alternating threshold-crossing boundaries
    Segments {
        #[command(flatten)]
        feature: FeatureArgs,

        /// Threshold on the normalized energy (0.0-1.0)
        #[arg(long)]
        step: Option<f64>,
    },
    /// Fade the signal in and out and write the result
    Fade {
        /// Input audio file (WAV)
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Fade length in milliseconds
        #[arg(long)]
        duration_ms: Option<u32>,

        /// Fade shape
        #[arg(long, value_enum)]
        shape: Option<FadeShape>,
    },
    /// Magnitude spectrum of a time interval
    Spectrum {
        #[command(flatten)]
        interval: IntervalArgs,

        /// Write frequencies and magnitudes as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Edit the spectrum of a time interval and write the reconstruction
    Edit {
        #[command(flatten)]
        interval: IntervalArgs,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Frequency-domain modification
        #[arg(long, value_enum)]
        policy: Option<EditPolicy>,

        /// Write the whole signal with the interval replaced, instead of the interval alone
        #[arg(long)]
        splice: bool,
    },
}

#[derive(Args, Debug)]
pub struct FeatureArgs {
    /// Input audio file (WAV)
    pub input: PathBuf,

    /// Frame length in milliseconds
    #[arg(long)]
    pub frame_ms: Option<u32>,

    /// Write the series as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct IntervalArgs {
    /// Input audio file (WAV)
    pub input: PathBuf,

    /// Interval start in seconds
    #[arg(long)]
    pub start: Option<f64>,

    /// Interval end in seconds (exclusive)
    #[arg(long)]
    pub end: Option<f64>,

    /// Window applied before the transform
    #[arg(long, value_enum)]
    pub window: Option<Window>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EditPolicy {
    /// Zero everything above the cutoff frequency
    Remove,
    /// Add a tone at the configured frequency
    Add,
    /// Shift frequencies (not supported)
    Move,
}

impl EditPolicy {
    pub const ALL: [EditPolicy; 3] = [EditPolicy::Remove, EditPolicy::Add, EditPolicy::Move];

    pub fn label(self) -> &'static str {
        match self {
            EditPolicy::Remove => "Remove frequencies",
            EditPolicy::Add => "Add frequencies",
            EditPolicy::Move => "Move frequencies",
        }
    }
}
