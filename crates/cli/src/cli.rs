//! CLI: command-line surface, kept apart from execution.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::LogLevel;

/// Stream log files and summarize matching lines
#[derive(Debug, Parser)]
#[command(name = "log-sheriff", version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize one or more log files
    Summarize(SummarizeArgs),
}

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Input log files
    #[arg(required = true, value_parser = existing_file)]
    pub files: Vec<PathBuf>,

    /// Only keep lines containing this text (case-sensitive)
    #[arg(long)]
    pub contains: Option<String>,

    /// Only keep lines mentioning this level
    #[arg(long, value_enum, ignore_case = true)]
    pub level: Option<LevelArg>,

    /// Drop lines stamped before this time (YYYY-MM-DDTHH:MM:SSZ or YYYY-MM-DD HH:MM:SS)
    #[arg(long)]
    pub since: Option<String>,

    /// Drop lines stamped after this time (YYYY-MM-DDTHH:MM:SSZ or YYYY-MM-DD HH:MM:SS)
    #[arg(long)]
    pub until: Option<String>,

    /// Number of normalized lines to show [default: 10]
    #[arg(long)]
    pub top: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long, overrides_with = "table")]
    pub json: bool,

    /// Print a table even when JSON is the configured default
    #[arg(long, overrides_with = "json")]
    pub table: bool,
}

impl SummarizeArgs {
    /// Output format after applying the configured default.
    pub fn wants_json(&self, default: bool) -> bool {
        if self.table {
            false
        } else {
            self.json || default
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LevelArg> for LogLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Error => LogLevel::Error,
            LevelArg::Warn => LogLevel::Warn,
            LevelArg::Info => LogLevel::Info,
            LevelArg::Debug => LogLevel::Debug,
        }
    }
}

fn existing_file(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("file does not exist: {}", raw))
    }
}
