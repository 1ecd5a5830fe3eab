//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
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

    /// Views this instant on a wall clock with the given offset.
    pub fn in_offset(&self, offset: FixedOffset) -> DateTime<FixedOffset> {
        offset.from_utc_datetime(&self.0.naive_utc())
    }

    /// Shifts by an arbitrary signed duration.
    pub fn plus(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }

    /// Creates a new timestamp by adding the specified number of days.
    pub fn plus_days(&self, days: i64) -> Self {
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

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn ordering_follows_time() {
        let earlier = at("2024-01-15T10:30:00Z");
        let later = at("2024-01-15T10:30:01Z");
        assert!(earlier < later);
        assert_eq!(earlier.plus(Duration::seconds(1)), later);
    }

    #[test]
    fn day_shifts_keep_time_of_day() {
        let ts = at("2024-01-15T00:00:10Z");
        assert_eq!(ts.minus_days(7), at("2024-01-08T00:00:10Z"));
        assert_eq!(ts.plus_days(1), at("2024-01-16T00:00:10Z"));
    }

    #[test]
    fn in_offset_shifts_wall_clock() {
        let ts = at("2024-01-15T02:00:00Z");
        let local = ts.in_offset(FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(local.day(), 14);
        assert_eq!(local.hour(), 21);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let ts = at("2024-01-15T10:30:00Z");
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));
    }
}
