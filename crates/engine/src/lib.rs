//! Streaming log summarization engine.
//!
//! Lines flow through a fixed filter pipeline (time range, substring, level),
//! and every surviving line is classified by severity and folded into a
//! frequency table keyed by its normalized text. Memory is bounded by the
//! number of distinct normalized lines, never by input size.
//!
//! # Architecture
//!
//! - `normalize.rs`: raw line → grouping key
//! - `level.rs`: severity enum, keyword classifier, per-level tally
//! - `timestamp/`: strict timestamp-prefix parser and local-zone abstraction
//! - `filter/`: per-line filter pipeline and scan statistics
//! - `aggregate.rs`: frequency table and bounded top-K selection
//! - `source.rs`: line-producing sources (files, in-memory)
//! - `summarize.rs`: run options, validation, and the scan driver

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod level;
pub mod normalize;
pub mod source;
pub mod summarize;
pub mod timestamp;

pub use aggregate::{FrequencyTable, TopLine};
pub use error::{ErrorKind, SummarizeError, SummarizeResult};
pub use filter::{FilterPipeline, ScanStats, TimeRange, Verdict};
pub use level::{LevelTally, LogLevel, ParseLevelError};
pub use normalize::normalize;
pub use source::{FileSource, LineReader, LineSource, MemorySource};
pub use summarize::{RunOptions, Summarizer, SummaryResult};
pub use timestamp::{FixedZone, HostZone, LocalZone, ParsedTimestamp, TimestampParser};

/// Default number of entries in the top-lines list.
pub const DEFAULT_TOP: usize = 10;
