//! Local day and week boundaries.
//!
//! "Local" is a fixed UTC offset chosen at startup. Weeks always start on
//! Monday 00:00 local, whatever the locale.

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Largest offset accepted, in minutes (UTC+14:00).
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Which week a history report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekSelector {
    #[default]
    Current,
    Prior,
}

impl WeekSelector {
    /// Interprets a `prior` request flag.
    ///
    /// Absent, empty, `0`, `false`, `no` and `off` select the current week.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(|f| f.trim().to_ascii_lowercase()) {
            None => WeekSelector::Current,
            Some(f) if matches!(f.as_str(), "" | "0" | "false" | "no" | "off") => {
                WeekSelector::Current
            }
            Some(_) => WeekSelector::Prior,
        }
    }
}

/// Converts instants into local day and week starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingCalendar {
    offset: FixedOffset,
}

impl ReportingCalendar {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Builds a calendar for `minutes` east of UTC.
    pub fn with_offset_minutes(minutes: i32) -> Result<Self, ValidationError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ValidationError::out_of_range(
                "utc_offset_minutes",
                -i64::from(MAX_OFFSET_MINUTES),
                i64::from(MAX_OFFSET_MINUTES),
                i64::from(minutes),
            ));
        }
        FixedOffset::east_opt(minutes * 60)
            .map(|offset| Self { offset })
            .ok_or_else(|| ValidationError::invalid_format("utc_offset_minutes", "invalid offset"))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local midnight of the day containing `now`.
    pub fn start_of_day(&self, now: Timestamp) -> Timestamp {
        let local = now.in_offset(self.offset);
        self.local_midnight(local.date_naive())
    }

    /// Local Monday 00:00 of the week containing `now`.
    pub fn start_of_week(&self, now: Timestamp) -> Timestamp {
        let local = now.in_offset(self.offset);
        let days_since_monday = i64::from(local.weekday().num_days_from_monday());
        self.local_midnight(local.date_naive() - Duration::days(days_since_monday))
    }

    /// Start of the week picked by `selector`, relative to `now`.
    pub fn week_start(&self, now: Timestamp, selector: WeekSelector) -> Timestamp {
        let current = self.start_of_week(now);
        match selector {
            WeekSelector::Current => current,
            WeekSelector::Prior => current.minus_days(7),
        }
    }

    /// `MM/DD - MM/DD` label of the seven days starting at `week_start`.
    ///
    /// The end date is the last instant of the span, one tick before the
    /// next week starts.
    pub fn range_label(&self, week_start: Timestamp) -> String {
        let finish = week_start.plus(Duration::days(7) - Duration::nanoseconds(1));
        format!(
            "{} - {}",
            week_start.in_offset(self.offset).format("%m/%d"),
            finish.in_offset(self.offset).format("%m/%d")
        )
    }

    fn local_midnight(&self, date: NaiveDate) -> Timestamp {
        let naive = date.and_time(NaiveTime::MIN)
            - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Timestamp::from_datetime(Utc.from_utc_datetime(&naive))
    }
}

impl Default for ReportingCalendar {
    fn default() -> Self {
        Self::utc()
    }
}
