mod cli;
mod commands;
mod config;
mod logging;
mod render;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::CliConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Phase 1: env-driven stderr logging while the config is read.
    // Thread-local so phase 2 can install the global subscriber.
    let basic_tracing = logging::init_basic();

    let config = CliConfig::load().context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow!(e))
        .context("Configuration validation failed")?;

    // Phase 2: global subscriber honouring the configured level.
    drop(basic_tracing);
    logging::init(&config);
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Summarize(args) => commands::summarize(args, &config),
    }
}
