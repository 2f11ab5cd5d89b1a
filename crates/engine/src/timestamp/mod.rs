//! Strict fixed-width timestamp parsing.
//!
//! Two shapes are accepted and nothing else:
//!
//! - `YYYY-MM-DDTHH:MM:SSZ` (20 chars), interpreted as UTC
//! - `YYYY-MM-DD HH:MM:SS` (19 chars), interpreted in the parser's [`LocalZone`]
//!
//! Calendar fields are validated (Gregorian leap years, no leap seconds).

mod zone;

pub use zone::{FixedZone, HostZone, LocalZone};

use chrono::NaiveDate;

use crate::normalize::{is_space, trim};

/// Length of the `YYYY-MM-DD HH:MM:SS` form.
pub const LOCAL_FORM_LEN: usize = 19;
/// Length of the `YYYY-MM-DDTHH:MM:SSZ` form.
pub const UTC_FORM_LEN: usize = 20;

/// Human-readable list of accepted formats, used in diagnostics.
pub const ACCEPTED_FORMATS: &str = "YYYY-MM-DDTHH:MM:SSZ or YYYY-MM-DD HH:MM:SS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimestamp {
    pub epoch_seconds: i64,
    /// Bytes consumed from the start of the input.
    pub consumed: usize,
}

pub fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// All-digit field of exactly `len` bytes at `pos`.
fn fixed_digits(input: &[u8], pos: usize, len: usize) -> Option<u32> {
    input.get(pos..pos + len)?.iter().try_fold(0u32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}

pub struct TimestampParser {
    zone: Box<dyn LocalZone>,
}

impl TimestampParser {
    pub fn new(zone: impl LocalZone + 'static) -> Self {
        Self { zone: Box::new(zone) }
    }

    /// Parser that converts local-form timestamps with the host's zone.
    pub fn host() -> Self {
        Self::new(HostZone)
    }

    /// Parse a timestamp at the start of `input`.
    ///
    /// If anything follows the timestamp, the next byte must be whitespace;
    /// `2026-02-09T18:01:02Zabc` is rejected.
    pub fn parse_prefix(&self, input: &[u8]) -> Option<ParsedTimestamp> {
        if input.len() < LOCAL_FORM_LEN {
            return None;
        }
        if input[4] != b'-' || input[7] != b'-' || input[13] != b':' || input[16] != b':' {
            return None;
        }
        let is_utc = match input[10] {
            b'T' => true,
            b' ' => false,
            _ => return None,
        };

        let year = fixed_digits(input, 0, 4)?;
        let month = fixed_digits(input, 5, 2)?;
        let day = fixed_digits(input, 8, 2)?;
        let hour = fixed_digits(input, 11, 2)?;
        let minute = fixed_digits(input, 14, 2)?;
        let second = fixed_digits(input, 17, 2)?;

        if !(1..=12).contains(&month) {
            return None;
        }
        if day < 1 || day > days_in_month(year, month) {
            return None;
        }
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }

        let consumed = if is_utc {
            if input.get(LOCAL_FORM_LEN) != Some(&b'Z') {
                return None;
            }
            UTC_FORM_LEN
        } else {
            LOCAL_FORM_LEN
        };

        if let Some(&next) = input.get(consumed) {
            if !is_space(next) {
                return None;
            }
        }

        let naive = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?
            .and_hms_opt(hour, minute, second)?;
        let epoch_seconds = if is_utc {
            naive.and_utc().timestamp()
        } else {
            self.zone.local_to_epoch(naive)?
        };

        Some(ParsedTimestamp { epoch_seconds, consumed })
    }

    /// Parse a standalone timestamp value such as a `--since` bound.
    ///
    /// Surrounding whitespace is ignored; any other trailing content fails.
    pub fn parse_exact(&self, input: &str) -> Option<i64> {
        let trimmed = trim(input.as_bytes());
        let parsed = self.parse_prefix(trimmed)?;
        (parsed.consumed == trimmed.len()).then_some(parsed.epoch_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn utc_parser() -> TimestampParser {
        TimestampParser::new(FixedZone::utc())
    }

    // ── Calendar helpers ────────────────────────────────────────

    #[test]
    fn test_leap_year_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2026));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 1), 31);
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2026, 4), 30);
        assert_eq!(days_in_month(2026, 13), 0);
    }

    // ── Prefix parse ────────────────────────────────────────────

    #[test]
    fn test_utc_prefix_with_trailing_message() {
        let parsed = utc_parser()
            .parse_prefix(b"2026-02-09T18:01:00Z INFO ready")
            .unwrap();
        assert_eq!(parsed.epoch_seconds, 1_770_660_060);
        assert_eq!(parsed.consumed, 20);
    }

    #[test]
    fn test_local_prefix_uses_zone() {
        let parsed = utc_parser().parse_prefix(b"2026-02-09 18:01:00 INFO one").unwrap();
        assert_eq!(parsed.epoch_seconds, 1_770_660_060);
        assert_eq!(parsed.consumed, 19);

        let plus_two = TimestampParser::new(FixedZone::east_seconds(7200).unwrap());
        let parsed = plus_two.parse_prefix(b"2026-02-09 20:01:00").unwrap();
        assert_eq!(parsed.epoch_seconds, 1_770_660_060);
    }

    #[test]
    fn test_utc_form_ignores_local_zone() {
        let plus_two = TimestampParser::new(FixedZone::east_seconds(7200).unwrap());
        let parsed = plus_two.parse_prefix(b"2026-02-09T18:01:00Z").unwrap();
        assert_eq!(parsed.epoch_seconds, 1_770_660_060);
    }

    #[test]
    fn test_timestamp_alone_is_accepted() {
        assert!(utc_parser().parse_prefix(b"2026-02-09T18:01:00Z").is_some());
        assert!(utc_parser().parse_prefix(b"2026-02-09 18:01:00").is_some());
    }

    #[test]
    fn test_trailing_tab_or_cr_is_whitespace() {
        assert!(utc_parser().parse_prefix(b"2026-02-09T18:01:00Z\tmsg").is_some());
        assert!(utc_parser().parse_prefix(b"2026-02-09 18:01:00\r").is_some());
    }

    #[test]
    fn test_embedded_timestamp_rejected() {
        assert!(utc_parser().parse_prefix(b"2026-02-09T18:01:00Zabc").is_none());
        assert!(utc_parser().parse_prefix(b"2026-02-09 18:01:00.123 INFO").is_none());
        assert!(utc_parser().parse_prefix(b"2026-02-09 18:01:00Z").is_none());
    }

    #[test]
    fn test_utc_form_requires_z() {
        assert!(utc_parser().parse_prefix(b"2026-02-09T18:01:00").is_none());
        assert!(utc_parser().parse_prefix(b"2026-02-09T18:01:00+00:00").is_none());
    }

    #[test]
    fn test_wrong_separators_rejected() {
        assert!(utc_parser().parse_prefix(b"2026/02/09T18:01:00Z").is_none());
        assert!(utc_parser().parse_prefix(b"2026-02-09_18:01:00").is_none());
        assert!(utc_parser().parse_prefix(b"2026-02-09T18.01.00Z").is_none());
    }

    #[test]
    fn test_non_digit_fields_rejected() {
        assert!(utc_parser().parse_prefix(b"2O26-02-09T18:01:00Z").is_none());
        assert!(utc_parser().parse_prefix(b"2026-0a-09T18:01:00Z").is_none());
        assert!(utc_parser().parse_prefix(b"2026-02-09T1 :01:00Z").is_none());
    }

    #[test]
    fn test_short_input_rejected() {
        assert!(utc_parser().parse_prefix(b"").is_none());
        assert!(utc_parser().parse_prefix(b"2026-02-09").is_none());
        assert!(utc_parser().parse_prefix(b"INFO line without timestamp").is_none());
    }

    // ── Calendar validation ─────────────────────────────────────

    #[test]
    fn test_month_and_day_ranges() {
        let p = utc_parser();
        assert!(p.parse_prefix(b"2026-00-09T18:01:00Z").is_none());
        assert!(p.parse_prefix(b"2026-13-09T18:01:00Z").is_none());
        assert!(p.parse_prefix(b"2026-02-00T18:01:00Z").is_none());
        assert!(p.parse_prefix(b"2026-04-31T00:00:00Z").is_none());
        assert!(p.parse_prefix(b"2026-12-31T23:59:59Z").is_some());
    }

    #[test]
    fn test_leap_day_validation() {
        let p = utc_parser();
        assert_eq!(
            p.parse_prefix(b"2024-02-29T00:00:00Z").map(|t| t.epoch_seconds),
            Some(1_709_164_800)
        );
        assert_eq!(
            p.parse_prefix(b"2000-02-29T12:00:00Z").map(|t| t.epoch_seconds),
            Some(951_825_600)
        );
        assert!(p.parse_prefix(b"2026-02-29T00:00:00Z").is_none());
        assert!(p.parse_prefix(b"1900-02-29T00:00:00Z").is_none());
    }

    #[test]
    fn test_time_of_day_ranges() {
        let p = utc_parser();
        assert!(p.parse_prefix(b"2026-02-09T24:00:00Z").is_none());
        assert!(p.parse_prefix(b"2026-02-09T23:60:00Z").is_none());
        assert!(p.parse_prefix(b"2026-02-09T23:59:60Z").is_none());
        assert!(p.parse_prefix(b"2026-02-09T00:00:00Z").is_some());
    }

    #[test]
    fn test_epoch_origin() {
        assert_eq!(utc_parser().parse_exact("1970-01-01T00:00:00Z"), Some(0));
    }

    // ── Exact parse ─────────────────────────────────────────────

    #[test]
    fn test_exact_trims_whitespace() {
        assert_eq!(
            utc_parser().parse_exact("  2026-02-09T18:01:00Z \n"),
            Some(1_770_660_060)
        );
    }

    #[test]
    fn test_exact_rejects_trailing_content() {
        assert!(utc_parser().parse_exact("2026-02-09T18:01:00Z INFO").is_none());
        assert!(utc_parser().parse_exact("2026-02-09 18:01:00 x").is_none());
        assert!(utc_parser().parse_exact("yesterday").is_none());
        assert!(utc_parser().parse_exact("").is_none());
    }

    // ── Zone policy ─────────────────────────────────────────────

    /// Zone that has no valid mapping for any wall-clock time, as in a DST gap.
    struct GapZone;

    impl LocalZone for GapZone {
        fn local_to_epoch(&self, _local: NaiveDateTime) -> Option<i64> {
            None
        }
    }

    #[test]
    fn test_unmappable_local_time_rejected() {
        let parser = TimestampParser::new(GapZone);
        assert!(parser.parse_prefix(b"2026-03-29 02:30:00 INFO").is_none());
        assert!(parser.parse_exact("2026-03-29 02:30:00").is_none());
        // UTC form never consults the zone.
        assert!(parser.parse_exact("2026-03-29T02:30:00Z").is_some());
    }
}
