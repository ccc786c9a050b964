use crate::input::ManualEntry;
use crate::io::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dyscreen")]
#[command(about = "Heuristic reading-difficulty risk screening", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score one record given as flags or as an uploaded CSV file
    Analyze {
        /// CSV file: a header line of metric labels followed by one data line
        #[arg(long, conflicts_with_all = MetricArgs::FLAGS)]
        file: Option<PathBuf>,

        #[command(flatten)]
        metrics: MetricArgs,

        /// Output format (defaults to the config file's, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .dyscreen.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        plain: bool,
    },

    /// Initialize a .dyscreen.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Per-metric values. Anything omitted starts at its default.
#[derive(Args, Debug, Clone, Default)]
pub struct MetricArgs {
    /// Reading speed in words per minute
    #[arg(long)]
    pub reading_speed: Option<f64>,

    /// Mean fixation duration in milliseconds
    #[arg(long)]
    pub fixation_duration: Option<f64>,

    /// Mean saccade length in pixels
    #[arg(long)]
    pub saccade_length: Option<f64>,

    /// Number of phoneme errors
    #[arg(long)]
    pub phoneme_errors: Option<f64>,

    /// Number of spelling errors
    #[arg(long)]
    pub spelling_errors: Option<f64>,

    /// Comprehension score (0-100)
    #[arg(long)]
    pub comprehension_score: Option<f64>,
}

impl MetricArgs {
    pub const FLAGS: [&'static str; 6] = [
        "reading_speed",
        "fixation_duration",
        "saccade_length",
        "phoneme_errors",
        "spelling_errors",
        "comprehension_score",
    ];
}

impl From<MetricArgs> for ManualEntry {
    fn from(args: MetricArgs) -> Self {
        ManualEntry {
            reading_speed: args.reading_speed,
            fixation_duration: args.fixation_duration,
            saccade_length: args.saccade_length,
            phoneme_errors: args.phoneme_errors,
            spelling_errors: args.spelling_errors,
            comprehension_score: args.comprehension_score,
        }
    }
}
