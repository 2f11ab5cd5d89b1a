//! Frequency aggregation and bounded top-K selection.
//!
//! The table only grows with the number of distinct normalized keys. Top-K
//! keeps a max-heap of the K best candidates seen so far, whose root is the
//! weakest kept entry, giving O(n log k) extraction.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt::Write;

use serde::Serialize;

use crate::normalize::normalize;

/// A normalized line and how often it was matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopLine {
    #[serde(rename = "line")]
    pub normalized_line: String,
    pub count: u64,
}

#[derive(Debug, Default)]
pub struct FrequencyTable {
    counts: HashMap<Vec<u8>, u64>,
    inserted: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for an already-normalized key.
    pub fn record(&mut self, key: Vec<u8>) {
        *self.counts.entry(key).or_insert(0) += 1;
        self.inserted += 1;
    }

    /// Normalize `line` and count it.
    pub fn record_line(&mut self, line: &[u8]) {
        self.record(normalize(line));
    }

    pub fn count(&self, key: &[u8]) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts; equals the number of recorded lines.
    pub fn total(&self) -> u64 {
        self.inserted
    }

    /// The `k` most frequent keys, count descending, ties broken by key
    /// ascending (byte-wise). Returns `min(k, distinct())` entries.
    pub fn top_k(&self, k: usize) -> Vec<TopLine> {
        if k == 0 {
            return Vec::new();
        }

        let mut heap: BinaryHeap<Ranked<'_>> = BinaryHeap::with_capacity(k.min(self.counts.len()));
        for (key, &count) in &self.counts {
            let candidate = Ranked { count, key };
            if heap.len() < k {
                heap.push(candidate);
            } else if let Some(mut weakest) = heap.peek_mut() {
                if candidate < *weakest {
                    *weakest = candidate;
                }
            }
        }

        heap.into_sorted_vec()
            .into_iter()
            .map(|ranked| TopLine {
                normalized_line: display_key(ranked.key),
                count: ranked.count,
            })
            .collect()
    }
}

/// Render a key as text. Bytes that are not valid UTF-8 are written as `\xNN`
/// so that distinct keys stay distinct.
fn display_key(key: &[u8]) -> String {
    let mut out = String::with_capacity(key.len());
    for chunk in key.utf8_chunks() {
        out.push_str(chunk.valid());
        for byte in chunk.invalid() {
            let _ = write!(out, "\\x{:02X}", byte);
        }
    }
    out
}

/// Heap entry ordered so that "greater" means "ranks lower".
#[derive(Debug, PartialEq, Eq)]
struct Ranked<'a> {
    count: u64,
    key: &'a [u8],
}

impl Ord for Ranked<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.key.cmp(other.key))
    }
}

impl PartialOrd for Ranked<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
