//! Filter module: per-line pipeline (time → substring → level) and scan stats.

pub mod engine;
pub mod stats;

pub use engine::{FilterPipeline, TimeRange, Verdict};
pub use stats::ScanStats;
