//! History domain module.
//!
//! Derived, read-only views over ledger rows: signed breakdowns, weekly
//! totals, the daily dashboard and reward balances. Nothing here is stored;
//! every figure is recomputed from the rows on request.

mod breakdown;
mod calendar;
mod reports;
mod window;

pub use breakdown::{SignedBreakdown, ValueSign};
pub use calendar::{ReportingCalendar, WeekSelector, MAX_OFFSET_MINUTES};
pub use reports::{
    CategoryBreakdownReport, CategoryBreakdownRow, DailySummary, DailyUserSummary,
    RewardBalance, UserBreakdown, UserTotal, WeeklyHistory, WeeklyTotals,
};
pub use window::TimeWindow;
