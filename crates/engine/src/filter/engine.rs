//! The filter pipeline applied to every candidate line.
//!
//! Stages run in a fixed order and short-circuit on the first rejection:
//! 1. time range (only when a bound is set; untimestamped lines are rejected)
//! 2. case-sensitive substring
//! 3. level keyword

use crate::level::{self, LogLevel};
use crate::timestamp::TimestampParser;

use super::stats::ScanStats;

/// Inclusive epoch-seconds bounds. An unset side is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub since: Option<i64>,
    pub until: Option<i64>,
}

impl TimeRange {
    pub fn is_active(&self) -> bool {
        self.since.is_some() || self.until.is_some()
    }

    pub fn contains(&self, epoch_seconds: i64) -> bool {
        self.since.map_or(true, |since| epoch_seconds >= since)
            && self.until.map_or(true, |until| epoch_seconds <= until)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Matched,
    RejectedTime,
    RejectedContains,
    RejectedLevel,
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    needle.len() <= haystack.len() && haystack.windows(needle.len()).any(|w| w == needle)
}

pub struct FilterPipeline<'a> {
    parser: &'a TimestampParser,
    range: TimeRange,
    contains: Option<&'a [u8]>,
    level: Option<LogLevel>,
    stats: ScanStats,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(
        parser: &'a TimestampParser,
        range: TimeRange,
        contains: Option<&'a str>,
        level: Option<LogLevel>,
    ) -> Self {
        Self {
            parser,
            range,
            contains: contains.map(str::as_bytes),
            level,
            stats: ScanStats::default(),
        }
    }

    /// Run `line` through every active stage without touching the stats.
    pub fn check(&self, line: &[u8]) -> Verdict {
        if self.range.is_active() {
            match self.parser.parse_prefix(line) {
                Some(ts) if self.range.contains(ts.epoch_seconds) => {}
                _ => return Verdict::RejectedTime,
            }
        }

        if let Some(needle) = self.contains {
            if !contains_bytes(line, needle) {
                return Verdict::RejectedContains;
            }
        }

        if let Some(wanted) = self.level {
            if !level::has_level(line, wanted) {
                return Verdict::RejectedLevel;
            }
        }

        Verdict::Matched
    }

    /// Evaluate `line`, record the outcome, and report whether it matched.
    #[inline]
    pub fn should_include(&mut self, line: &[u8]) -> bool {
        let verdict = self.check(line);
        self.stats.record(verdict, line.len());
        verdict == Verdict::Matched
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub fn into_stats(self) -> ScanStats {
        self.stats
    }
}
