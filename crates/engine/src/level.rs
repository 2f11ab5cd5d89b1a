//! Severity levels, keyword classification, and per-level tallies.
//!
//! Classification is a case-insensitive substring search, not a word match:
//! `warning` counts as Warn and `information` counts as Info.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// The four severities, declared in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    /// All levels in detection priority order.
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Lower-case keyword searched for in a line.
    pub fn keyword(&self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    /// Slot of this level in a [`LevelTally`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid level '{0}'; expected one of error, warn, info, debug")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| raw.eq_ignore_ascii_case(level.as_str()))
            .ok_or_else(|| ParseLevelError(raw.to_string()))
    }
}

/// Case-insensitive (ASCII) substring search. `needle` must be lower-case.
fn contains_keyword(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle))
}

/// Whether `line` mentions the keyword for `wanted`.
pub fn has_level(line: &[u8], wanted: LogLevel) -> bool {
    contains_keyword(line, wanted.keyword())
}

/// First level, in priority order, whose keyword appears anywhere in `line`.
pub fn detect(line: &[u8]) -> Option<LogLevel> {
    LogLevel::ALL.into_iter().find(|level| has_level(line, *level))
}

/// Count of matched lines per detected level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelTally([u64; 4]);

impl LevelTally {
    pub fn get(&self, level: LogLevel) -> u64 {
        self.0[level.index()]
    }

    pub fn increment(&mut self, level: LogLevel) {
        self.0[level.index()] += 1;
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogLevel, u64)> + '_ {
        LogLevel::ALL.into_iter().map(|level| (level, self.get(level)))
    }
}

impl Serialize for LevelTally {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(LogLevel::ALL.len()))?;
        for (level, count) in self.iter() {
            map.serialize_entry(level.as_str(), &count)?;
        }
        map.end()
    }
}
