//! Reporting and submission rules

use chrono::Duration;
use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::history::{AggregationSettings, DEFAULT_NEW_POINT_WINDOW_SECS};
use crate::application::handlers::ledger::BatchPolicy;
use crate::domain::history::{ReportingCalendar, MAX_OFFSET_MINUTES};

/// Longest accepted "new" lookback (one day).
const MAX_NEW_POINT_WINDOW_SECS: u64 = 86_400;

/// Ledger configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// How far back, in seconds, a point still counts as "new" on the
    /// users dashboard. Clients should poll at least this often.
    #[serde(default = "default_new_point_window")]
    pub new_point_window_secs: u64,

    /// Minutes east of UTC that define local midnight and Monday.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Batch point submission semantics (`partial` or `atomic`)
    #[serde(default)]
    pub batch_policy: BatchPolicy,
}

impl LedgerConfig {
    /// Build the reporting calendar for the configured offset
    pub fn calendar(&self) -> Result<ReportingCalendar, ValidationError> {
        ReportingCalendar::with_offset_minutes(self.utc_offset_minutes).map_err(|_| {
            ValidationError::InvalidUtcOffset {
                max: MAX_OFFSET_MINUTES,
            }
        })
    }

    /// Settings for the aggregation engine
    pub fn aggregation_settings(&self) -> Result<AggregationSettings, ValidationError> {
        Ok(AggregationSettings {
            calendar: self.calendar()?,
            new_point_window: Duration::seconds(self.new_point_window_secs as i64),
        })
    }

    /// Validate ledger configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.new_point_window_secs == 0 || self.new_point_window_secs > MAX_NEW_POINT_WINDOW_SECS
        {
            return Err(ValidationError::InvalidNewPointWindow {
                max: MAX_NEW_POINT_WINDOW_SECS,
            });
        }
        self.calendar()?;
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            new_point_window_secs: default_new_point_window(),
            utc_offset_minutes: 0,
            batch_policy: BatchPolicy::default(),
        }
    }
}

fn default_new_point_window() -> u64 {
    DEFAULT_NEW_POINT_WINDOW_SECS
}
