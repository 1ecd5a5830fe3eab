//! Half-open time windows over row creation times.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// The interval `[start, end)`. An absent `end` leaves the window open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Option<Timestamp>,
}

impl TimeWindow {
    /// Everything created at or after `start`.
    pub fn since(start: Timestamp) -> Self {
        Self { start, end: None }
    }

    /// Everything created in `[start, end)`.
    pub fn between(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Seven days starting at `start`.
    pub fn week_from(start: Timestamp) -> Self {
        Self::between(start, start.plus_days(7))
    }

    pub fn contains(&self, at: &Timestamp) -> bool {
        *at >= self.start && self.end.map_or(true, |end| *at < end)
    }
}
