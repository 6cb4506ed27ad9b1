//! `warmpool config` command.
//!
//! Prints the configuration after merging defaults, file and env layers.

use clap::Args;
use warmpool_config::WarmpoolConfig;

/// Print the effective configuration.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Print compact single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Executes the config command.
pub fn execute(args: &ConfigArgs, config: &WarmpoolConfig) -> anyhow::Result<()> {
    println!("{}", render(args, config)?);
    Ok(())
}

fn render(args: &ConfigArgs, config: &WarmpoolConfig) -> anyhow::Result<String> {
    let text = if args.compact {
        serde_json::to_string(config)?
    } else {
        serde_json::to_string_pretty(config)?
    };
    Ok(text)
}
