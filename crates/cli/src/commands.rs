//! Command execution: turns parsed arguments into an engine run.

use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};
use engine::{LineSource, RunOptions, Summarizer};

use crate::cli::SummarizeArgs;
use crate::config::CliConfig;
use crate::render;

pub fn summarize(args: SummarizeArgs, config: &CliConfig) -> Result<()> {
    let json = args.wants_json(config.json);
    let options = run_options(args, config);

    let summarizer = match config.local_zone().map_err(|e| anyhow!(e))? {
        Some(zone) => Summarizer::new().with_zone(zone),
        None => Summarizer::new(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&summarizer, &options, json, &mut out)?;
    out.flush().context("Failed to flush output")
}

pub fn run_options(args: SummarizeArgs, config: &CliConfig) -> RunOptions {
    RunOptions {
        files: args.files,
        contains: args.contains,
        level: args.level.map(Into::into),
        since: args.since,
        until: args.until,
        top: args.top.unwrap_or(config.top),
    }
}

fn execute<S, W>(
    summarizer: &Summarizer<S>,
    options: &RunOptions,
    json: bool,
    out: &mut W,
) -> Result<()>
where
    S: LineSource,
    W: Write,
{
    let result = summarizer.summarize(options)?;
    let written = if json {
        render::json(&result, out)
    } else {
        render::table(&result, out)
    };
    written.context("Failed to write summary")
}
