//! Summarize: option validation and the per-file, per-line scan driver.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::{FrequencyTable, TopLine};
use crate::error::{SummarizeError, SummarizeResult};
use crate::filter::{FilterPipeline, ScanStats, TimeRange};
use crate::level::{self, LevelTally, LogLevel};
use crate::source::{FileSource, LineReader, LineSource};
use crate::timestamp::{LocalZone, TimestampParser, ACCEPTED_FORMATS};
use crate::DEFAULT_TOP;

/// Everything one summarization run needs; built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub files: Vec<PathBuf>,
    pub contains: Option<String>,
    pub level: Option<LogLevel>,
    /// Raw lower bound, validated when the run starts.
    pub since: Option<String>,
    /// Raw upper bound, validated when the run starts.
    pub until: Option<String>,
    pub top: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            contains: None,
            level: None,
            since: None,
            until: None,
            top: DEFAULT_TOP,
        }
    }
}

impl RunOptions {
    pub fn for_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    pub files_processed: u64,
    pub total_lines: u64,
    pub matched_lines: u64,
    /// Matched lines per detected level, whether or not a level filter ran.
    pub matched_by_level: LevelTally,
    pub top_lines: Vec<TopLine>,
    #[serde(skip)]
    pub stats: ScanStats,
}

pub struct Summarizer<S = FileSource> {
    source: S,
    parser: TimestampParser,
}

impl Summarizer<FileSource> {
    pub fn new() -> Self {
        Self::with_source(FileSource)
    }
}

impl Default for Summarizer<FileSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LineSource> Summarizer<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            parser: TimestampParser::host(),
        }
    }

    /// Replace the zone used for `YYYY-MM-DD HH:MM:SS` timestamps.
    pub fn with_zone(mut self, zone: impl LocalZone + 'static) -> Self {
        self.parser = TimestampParser::new(zone);
        self
    }

    /// Check run-level options and resolve the time bounds.
    ///
    /// Nothing is opened here; a failure means no work was done.
    pub fn validate(&self, options: &RunOptions) -> SummarizeResult<TimeRange> {
        if options.files.is_empty() {
            return Err(SummarizeError::invalid("no input files supplied"));
        }

        let since = self.parse_bound(options.since.as_deref(), "--since")?;
        let until = self.parse_bound(options.until.as_deref(), "--until")?;

        if let (Some(since), Some(until)) = (since, until) {
            if since > until {
                return Err(SummarizeError::invalid(
                    "--since must be less than or equal to --until",
                ));
            }
        }

        Ok(TimeRange { since, until })
    }

    fn parse_bound(&self, raw: Option<&str>, option: &str) -> SummarizeResult<Option<i64>> {
        raw.map(|value| {
            self.parser.parse_exact(value).ok_or_else(|| {
                SummarizeError::invalid(format!(
                    "invalid {} timestamp; expected {}",
                    option, ACCEPTED_FORMATS
                ))
            })
        })
        .transpose()
    }

    /// Scan every file in order and build the summary.
    ///
    /// Fails without a partial result if validation fails or any file cannot
    /// be opened or read.
    pub fn summarize(&self, options: &RunOptions) -> SummarizeResult<SummaryResult> {
        let range = self.validate(options)?;
        let mut pipeline =
            FilterPipeline::new(&self.parser, range, options.contains.as_deref(), options.level);
        let mut table = FrequencyTable::new();
        let mut result = SummaryResult::default();

        for path in &options.files {
            let reader = self.source.open(path).map_err(|source| {
                SummarizeError::ResourceAcquisition {
                    path: path.clone(),
                    source,
                }
            })?;
            result.files_processed += 1;
            debug!(path = %path.display(), "scanning file");

            let before = result.total_lines;
            scan_lines(path, LineReader::new(reader), &mut pipeline, &mut table, &mut result)?;
            debug!(
                path = %path.display(),
                lines = result.total_lines - before,
                "finished file"
            );
        }

        result.top_lines = table.top_k(options.top);
        result.stats = pipeline.into_stats();

        info!(
            files = result.files_processed,
            total = result.total_lines,
            matched = result.matched_lines,
            distinct = table.distinct(),
            "summary complete"
        );
        debug!(
            bytes = result.stats.bytes_scanned,
            rejected_time = result.stats.rejected_time,
            rejected_contains = result.stats.rejected_contains,
            rejected_level = result.stats.rejected_level,
            "filter statistics"
        );

        Ok(result)
    }
}

fn scan_lines<R: std::io::BufRead>(
    path: &Path,
    mut lines: LineReader<R>,
    pipeline: &mut FilterPipeline<'_>,
    table: &mut FrequencyTable,
    result: &mut SummaryResult,
) -> SummarizeResult<()> {
    while let Some(line) = lines.next_line().map_err(|source| SummarizeError::Read {
        path: path.to_path_buf(),
        source,
    })? {
        result.total_lines += 1;

        if !pipeline.should_include(line) {
            continue;
        }

        result.matched_lines += 1;
        if let Some(detected) = level::detect(line) {
            result.matched_by_level.increment(detected);
        }
        table.record_line(line);
    }
    Ok(())
}
