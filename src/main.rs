use anyhow::Result;
use clap::Parser;
use dyscreen::cli::{Cli, Commands};
use dyscreen::commands::{self, AnalyzeConfig};
use tracing_subscriber::EnvFilter;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Analyze {
            file,
            metrics,
            format,
            output,
            config,
            plain,
        } => commands::handle_analyze(AnalyzeConfig {
            file,
            entry: metrics.into(),
            format,
            output,
            config,
            plain,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

// Pure function to map -v count to a default filter directive
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

// Side effect: install the global subscriber (also receives `log` records)
fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env("DYSCREEN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
