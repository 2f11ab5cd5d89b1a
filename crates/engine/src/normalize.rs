//! Normalizer: maps a raw log line to the key it is grouped under.
//!
//! Whitespace is trimmed and collapsed, and every maximal run of ASCII digits
//! becomes a single `<num>` token, so `took 12ms` and `took 450ms` share a key.

/// Key used for lines that are empty after trimming.
pub const EMPTY_KEY: &[u8] = b"<empty>";

/// Replacement token for a run of digits.
pub const NUM_TOKEN: &[u8] = b"<num>";

/// Whitespace as the C locale defines it (includes vertical tab and form feed).
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Strip leading and trailing whitespace.
pub fn trim(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|&b| !is_space(b)).unwrap_or(input.len());
    let end = input
        .iter()
        .rposition(|&b| !is_space(b))
        .map(|p| p + 1)
        .unwrap_or(start);
    &input[start..end]
}

/// Produce the grouping key for `line`.
///
/// Idempotent: normalizing an already-normalized key returns it unchanged.
pub fn normalize(line: &[u8]) -> Vec<u8> {
    let trimmed = trim(line);
    if trimmed.is_empty() {
        return EMPTY_KEY.to_vec();
    }

    let mut out = Vec::with_capacity(trimmed.len());
    let mut previous_was_space = false;
    let mut in_number = false;

    for &b in trimmed {
        if is_space(b) {
            if !previous_was_space {
                out.push(b' ');
            }
            previous_was_space = true;
            in_number = false;
        } else if b.is_ascii_digit() {
            if !in_number {
                out.extend_from_slice(NUM_TOKEN);
                in_number = true;
            }
            previous_was_space = false;
        } else {
            out.push(b);
            previous_was_space = false;
            in_number = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(line: &str) -> String {
        String::from_utf8(normalize(line.as_bytes())).unwrap()
    }

    // ── Whitespace ──────────────────────────────────────────────

    #[test]
    fn test_trims_and_collapses_whitespace() {
        assert_eq!(norm("  GET   /index \t\t ok  "), "GET /index ok");
    }

    #[test]
    fn test_carriage_return_is_trimmed() {
        assert_eq!(norm("INFO ready\r"), "INFO ready");
    }

    #[test]
    fn test_vertical_tab_counts_as_whitespace() {
        assert_eq!(norm("a\x0b\x0cb"), "a b");
    }

    #[test]
    fn test_empty_and_blank_lines_use_sentinel() {
        assert_eq!(norm(""), "<empty>");
        assert_eq!(norm(" \t \r"), "<empty>");
    }

    // ── Digit runs ──────────────────────────────────────────────

    #[test]
    fn test_digit_run_becomes_single_token() {
        assert_eq!(
            norm("INFO request id=100 took 12ms"),
            "INFO request id=<num> took <num>ms"
        );
    }

    #[test]
    fn test_separated_digits_are_separate_tokens() {
        assert_eq!(norm("10.0.0.1:8080"), "<num>.<num>.<num>.<num>:<num>");
        assert_eq!(norm("1 2"), "<num> <num>");
    }

    #[test]
    fn test_timestamp_prefix_collapses() {
        assert_eq!(
            norm("2026-02-09T18:01:02Z INFO up"),
            "<num>-<num>-<num>T<num>:<num>:<num>Z INFO up"
        );
    }

    #[test]
    fn test_non_utf8_bytes_are_copied() {
        assert_eq!(normalize(b"\xff 42 \xfe"), b"\xff <num> \xfe".to_vec());
    }

    // ── Idempotence ─────────────────────────────────────────────

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "<empty>",
            "INFO request id=100 took 12ms",
            "  [WARN]\tdisk 93%   full on /dev/sda1 ",
            "2026-02-09 18:01:00 INFO one",
            "a1b22c333",
        ];
        for sample in samples {
            let once = normalize(sample.as_bytes());
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_trim_helper() {
        assert_eq!(trim(b"  x y  "), b"x y");
        assert_eq!(trim(b"   "), b"");
        assert_eq!(trim(b""), b"");
    }
}
