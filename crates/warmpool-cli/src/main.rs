//! warmpool CLI - exercise object pool registries from the terminal.

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod output;

/// warmpool - keyed object pools for reusable engine instances.
#[derive(Debug, Parser)]
#[command(name = "warmpool", version, about)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbosity level (-v, -vv). Overrides the configured log level.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, global = true, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Drive a simulated pool with random checkouts and returns.
    Exercise(commands::exercise::ExerciseArgs),
    /// Print the merged configuration.
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = warmpool_config::load_config(cli.config.as_deref())?;

    // Initialize tracing.
    let filter = match cli.verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    match cli.log_format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    };

    tracing::debug!("warmpool starting with config: {:?}", cli.config);

    match &cli.command {
        Commands::Exercise(args) => commands::exercise::execute(args, &config),
        Commands::Config(args) => commands::config::execute(args, &config),
    }
}
