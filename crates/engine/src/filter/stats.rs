use super::engine::Verdict;

/// Counters collected while a pipeline evaluates lines.
///
/// Every scanned line lands in exactly one bucket, so
/// `lines_scanned == matched + rejected()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub lines_scanned: u64,
    pub bytes_scanned: u64,
    pub matched: u64,
    pub rejected_time: u64,
    pub rejected_contains: u64,
    pub rejected_level: u64,
}

impl ScanStats {
    pub(crate) fn record(&mut self, verdict: Verdict, line_len: usize) {
        self.lines_scanned += 1;
        self.bytes_scanned += line_len as u64;
        match verdict {
            Verdict::Matched => self.matched += 1,
            Verdict::RejectedTime => self.rejected_time += 1,
            Verdict::RejectedContains => self.rejected_contains += 1,
            Verdict::RejectedLevel => self.rejected_level += 1,
        }
    }

    pub fn rejected(&self) -> u64 {
        self.rejected_time + self.rejected_contains + self.rejected_level
    }
}
