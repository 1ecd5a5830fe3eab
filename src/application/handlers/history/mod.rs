//! History query handlers.
//!
//! Read-only handlers over the aggregation engine. None of them write.

mod engine;
mod get_daily_breakdown;
mod get_daily_summary;
mod get_reward_balance;
mod get_weekly_history;

pub use engine::{AggregationEngine, AggregationSettings, DEFAULT_NEW_POINT_WINDOW_SECS};
pub use get_daily_breakdown::{GetDailyBreakdownHandler, GetDailyBreakdownQuery};
pub use get_daily_summary::{GetDailySummaryHandler, GetDailySummaryQuery};
pub use get_reward_balance::{GetRewardBalanceHandler, GetRewardBalanceQuery};
pub use get_weekly_history::{GetWeeklyHistoryHandler, GetWeeklyHistoryQuery};
