//! Render: table and JSON views of a [`SummaryResult`].

use std::io::{self, Write};

use engine::{LevelTally, LogLevel, SummaryResult};
use serde::Serialize;

/// JSON view of a summary with display-safe strings.
#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    files_processed: u64,
    total_lines: u64,
    matched_lines: u64,
    matched_by_level: &'a LevelTally,
    top_lines: Vec<JsonTopLine>,
}

#[derive(Debug, Serialize)]
struct JsonTopLine {
    line: String,
    count: u64,
}

/// Replace control characters that have no short JSON escape with `?`.
///
/// serde_json writes `\b`, `\f`, `\n`, `\r` and `\t` as two-character
/// escapes; anything else below 0x20 would become `\u00XX`.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '\u{08}' | '\u{0c}' | '\n' | '\r' | '\t' => c,
            c if (c as u32) < 0x20 => '?',
            c => c,
        })
        .collect()
}

pub fn json<W: Write>(result: &SummaryResult, out: &mut W) -> io::Result<()> {
    let view = JsonSummary {
        files_processed: result.files_processed,
        total_lines: result.total_lines,
        matched_lines: result.matched_lines,
        matched_by_level: &result.matched_by_level,
        top_lines: result
            .top_lines
            .iter()
            .map(|entry| JsonTopLine {
                line: sanitize(&entry.normalized_line),
                count: entry.count,
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &view)?;
    writeln!(out)
}

pub fn table<W: Write>(result: &SummaryResult, out: &mut W) -> io::Result<()> {
    let levels = &result.matched_by_level;
    writeln!(out, "Files processed: {}", result.files_processed)?;
    writeln!(out, "Total lines:     {}", result.total_lines)?;
    writeln!(out, "Matched lines:   {}", result.matched_lines)?;
    writeln!(
        out,
        "Matched by level: error={} warn={} info={} debug={}",
        levels.get(LogLevel::Error),
        levels.get(LogLevel::Warn),
        levels.get(LogLevel::Info),
        levels.get(LogLevel::Debug),
    )?;

    writeln!(out)?;
    writeln!(out, "Top lines:")?;
    if result.top_lines.is_empty() {
        return writeln!(out, "(no matching lines)");
    }

    writeln!(out, "{:<6}{:<7}Normalized line", "Rank", "Count")?;
    for (rank, entry) in result.top_lines.iter().enumerate() {
        writeln!(out, "{:<6}{:<7}{}", rank + 1, entry.count, entry.normalized_line)?;
    }
    Ok(())
}
