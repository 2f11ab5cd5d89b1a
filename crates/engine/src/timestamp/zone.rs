//! Local-time conversion behind a trait so callers can pin a zone.
//!
//! Wall-clock times that are ambiguous (DST fold) or nonexistent (DST gap)
//! in the zone have no single epoch value and are rejected.

use chrono::{FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};

/// Converts a local wall-clock time to epoch seconds.
pub trait LocalZone: Send + Sync {
    fn local_to_epoch(&self, local: NaiveDateTime) -> Option<i64>;
}

/// The host's configured time zone, DST rules included.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostZone;

impl LocalZone for HostZone {
    fn local_to_epoch(&self, local: NaiveDateTime) -> Option<i64> {
        Local
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.timestamp())
    }
}

/// A zone with a constant UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedZone(FixedOffset);

impl FixedZone {
    pub fn new(offset: FixedOffset) -> Self {
        Self(offset)
    }

    pub fn utc() -> Self {
        Self(Utc.fix())
    }

    /// Offset in seconds east of UTC; `None` when out of range (±24h).
    pub fn east_seconds(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(Self)
    }

    pub fn offset(&self) -> FixedOffset {
        self.0
    }
}

impl LocalZone for FixedZone {
    fn local_to_epoch(&self, local: NaiveDateTime) -> Option<i64> {
        self.0
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wall(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_utc_zone_matches_utc_calendar() {
        assert_eq!(FixedZone::utc().local_to_epoch(wall(18, 1, 0)), Some(1_770_660_060));
    }

    #[test]
    fn test_east_offset_is_subtracted() {
        let zone = FixedZone::east_seconds(2 * 3600).unwrap();
        assert_eq!(zone.local_to_epoch(wall(20, 1, 0)), Some(1_770_660_060));
    }

    #[test]
    fn test_west_offset_is_added() {
        let zone = FixedZone::east_seconds(-5 * 3600).unwrap();
        assert_eq!(zone.local_to_epoch(wall(13, 1, 0)), Some(1_770_660_060));
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        assert!(FixedZone::east_seconds(86_400).is_none());
    }
}
