//! Config: defaults for the CLI, loaded from TOML and environment variables.
//!
//! Priority: command-line flag > environment variable > config file > default.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::FixedOffset;
use engine::{FixedZone, DEFAULT_TOP};
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH_ENV: &str = "LOG_SHERIFF_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "/etc/log-sheriff/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default for `--top`.
    pub top: usize,
    /// Default output format; `--json` or `--table` overrides it.
    pub json: bool,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Fixed offset such as `+02:00` for `YYYY-MM-DD HH:MM:SS` timestamps.
    /// When unset the host time zone is used.
    pub utc_offset: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            json: false,
            log_level: "warn".to_string(),
            utc_offset: None,
        }
    }
}

impl CliConfig {
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        toml::from_str(&contents).with_context(|| format!("Invalid config file {}", path))
    }

    /// Apply `LOG_SHERIFF_*` overrides; unparseable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("LOG_SHERIFF_TOP") {
            match raw.trim().parse() {
                Ok(top) => self.top = top,
                Err(_) => tracing::warn!(
                    "Ignoring LOG_SHERIFF_TOP={:?}: not a non-negative integer",
                    raw
                ),
            }
        }
        if let Some(raw) = lookup("LOG_SHERIFF_JSON") {
            match raw.trim().parse() {
                Ok(json) => self.json = json,
                Err(_) => tracing::warn!(
                    "Ignoring LOG_SHERIFF_JSON={:?}: expected true or false",
                    raw
                ),
            }
        }
        if let Some(level) = lookup("LOG_SHERIFF_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(offset) = lookup("LOG_SHERIFF_UTC_OFFSET") {
            self.utc_offset = Some(offset);
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.log_level.trim().is_empty() {
            return Err("log_level must not be empty".to_string());
        }
        if let Some(raw) = &self.utc_offset {
            parse_offset(raw)?;
        }
        Ok(())
    }

    /// The pinned local zone, if one is configured.
    pub fn local_zone(&self) -> Result<Option<FixedZone>, String> {
        self.utc_offset
            .as_deref()
            .map(|raw| parse_offset(raw).map(FixedZone::new))
            .transpose()
    }
}

fn parse_offset(raw: &str) -> Result<FixedOffset, String> {
    raw.trim()
        .parse::<FixedOffset>()
        .map_err(|e| format!("utc_offset {:?} is not a valid offset like +02:00: {}", raw, e))
}
