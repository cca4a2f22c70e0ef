//! Timestamp value object and fixed-offset calendar math.
//!
//! Timestamps are always UTC. Calendar-day reasoning (attendance idempotency,
//! absentee day counts, receipt dates) goes through `TimeZoneOffset`, the
//! single fixed offset the deployment operates in. Mixing naive and
//! zone-aware values is a bug; the only conversion point is this module.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

/// Fixed UTC offset used for all calendar-day computations.
///
/// The deployment runs in a single zone with no daylight saving, so a fixed
/// offset is sufficient and keeps date math free of DST edge cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZoneOffset(FixedOffset);

impl TimeZoneOffset {
    /// Creates an offset from minutes east of UTC.
    ///
    /// Returns None for offsets outside +/- 24 hours.
    pub fn from_minutes_east(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes * 60).map(Self)
    }

    /// Indian Standard Time (+05:30), the deployment default.
    pub fn ist() -> Self {
        Self(FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST is a valid offset"))
    }

    /// Returns the local calendar date of a timestamp in this zone.
    pub fn local_date(&self, ts: &Timestamp) -> NaiveDate {
        ts.as_datetime().with_timezone(&self.0).date_naive()
    }

    /// Whole local calendar days elapsed from `earlier` to `later`.
    ///
    /// Counts date boundaries crossed in this zone, not 24-hour intervals.
    pub fn days_between(&self, earlier: &Timestamp, later: &Timestamp) -> i64 {
        self.local_date(later)
            .signed_duration_since(self.local_date(earlier))
            .num_days()
    }

    /// UTC half-open interval `[start, end)` covering the local calendar
    /// day that contains `ts`.
    pub fn day_bounds(&self, ts: &Timestamp) -> (Timestamp, Timestamp) {
        let date = self.local_date(ts);
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .expect("midnight is a valid time")
            .and_local_timezone(self.0)
            .single()
            .expect("fixed offsets have no ambiguous local times");
        let start = Timestamp::from_datetime(midnight.with_timezone(&Utc));
        (start, start.add_days(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn ts(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn timestamp_ordering_works() {
        let ts1 = ts("2026-01-15T10:00:00Z");
        let ts2 = ts("2026-01-15T10:00:01Z");
        assert!(ts1.is_before(&ts2));
        assert!(ts2.is_after(&ts1));
        assert!(ts1 < ts2);
    }

    #[test]
    fn add_days_shifts_forward() {
        let start = ts("2026-01-01T09:00:00Z");
        let end = start.add_days(30);
        assert_eq!(end.duration_since(&start).num_days(), 30);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let json = serde_json::to_string(&ts("2026-01-15T10:30:00Z")).unwrap();
        assert!(json.contains("2026-01-15"));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let parsed: Timestamp = serde_json::from_str("\"2026-01-15T10:30:00Z\"").unwrap();
        assert_eq!(parsed.as_datetime().year(), 2026);
    }

    #[test]
    fn ist_local_date_crosses_utc_midnight() {
        // 20:00 UTC is 01:30 the next day in IST.
        let late_evening = ts("2026-03-10T20:00:00Z");
        let date = TimeZoneOffset::ist().local_date(&late_evening);
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
    }

    #[test]
    fn days_between_counts_local_date_boundaries() {
        let zone = TimeZoneOffset::ist();
        // 18:35 UTC = 00:05 IST next day; one boundary crossed even though
        // less than an hour elapsed.
        let a = ts("2026-03-10T18:25:00Z");
        let b = ts("2026-03-10T18:40:00Z");
        assert_eq!(zone.days_between(&a, &b), 1);
    }

    #[test]
    fn days_between_ten_days() {
        let zone = TimeZoneOffset::ist();
        let last = ts("2026-03-01T05:00:00Z");
        let now = ts("2026-03-11T05:00:00Z");
        assert_eq!(zone.days_between(&last, &now), 10);
    }

    #[test]
    fn day_bounds_cover_the_local_day() {
        let zone = TimeZoneOffset::ist();
        // 01:30 IST on March 11.
        let ts_in_day = ts("2026-03-10T20:00:00Z");
        let (start, end) = zone.day_bounds(&ts_in_day);
        // Local midnight March 11 is 18:30 UTC March 10.
        assert_eq!(start, ts("2026-03-10T18:30:00Z"));
        assert_eq!(end, ts("2026-03-11T18:30:00Z"));
        assert!(ts_in_day >= start && ts_in_day < end);
    }

    #[test]
    fn from_minutes_east_rejects_out_of_range() {
        assert!(TimeZoneOffset::from_minutes_east(330).is_some());
        assert!(TimeZoneOffset::from_minutes_east(100_000).is_none());
    }

    #[test]
    fn utc_roundtrip_matches_chrono() {
        let dt = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(Timestamp::from_datetime(dt).as_datetime(), &dt);
    }
}
