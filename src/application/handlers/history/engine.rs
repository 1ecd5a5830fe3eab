//! Aggregation engine - derives point summaries from raw ledger rows.
//!
//! Every method reads fresh from the `LedgerReader`; nothing is cached
//! between calls. The current instant is always passed in by the caller.

use std::sync::Arc;

use chrono::Duration;
use tracing::debug;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::history::{
    CategoryBreakdownReport, CategoryBreakdownRow, DailySummary, DailyUserSummary,
    ReportingCalendar, RewardBalance, SignedBreakdown, TimeWindow, UserBreakdown, UserTotal,
    ValueSign, WeekSelector, WeeklyTotals,
};
use crate::domain::ledger::{EntityKind, LedgerError, User};
use crate::ports::{LedgerReader, PointFilter, RewardFilter};

/// Default lookback for points shown as "new" on the daily dashboard.
pub const DEFAULT_NEW_POINT_WINDOW_SECS: u64 = 10;

/// Reporting rules shared by every history query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationSettings {
    pub calendar: ReportingCalendar,
    /// How far back a point still counts as "new".
    pub new_point_window: Duration,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            calendar: ReportingCalendar::utc(),
            new_point_window: Duration::seconds(DEFAULT_NEW_POINT_WINDOW_SECS as i64),
        }
    }
}

/// Computes breakdowns, totals and balances through the reader port.
pub struct AggregationEngine {
    reader: Arc<dyn LedgerReader>,
    settings: AggregationSettings,
}

impl AggregationEngine {
    pub fn new(reader: Arc<dyn LedgerReader>, settings: AggregationSettings) -> Self {
        Self { reader, settings }
    }

    pub fn settings(&self) -> &AggregationSettings {
        &self.settings
    }

    /// Monday 00:00 of the current or the prior week.
    pub fn week_start(&self, now: Timestamp, selector: WeekSelector) -> Timestamp {
        self.settings.calendar.week_start(now, selector)
    }

    /// `{neg, pos}` for every category and user over `window`.
    ///
    /// Pairs with no matching points are present with zeros.
    pub async fn category_breakdown(
        &self,
        window: TimeWindow,
    ) -> Result<CategoryBreakdownReport, LedgerError> {
        let categories = self.reader.list_categories().await?;
        let users = self.reader.list_users().await?;

        let mut rows = Vec::with_capacity(categories.len());
        for category in categories {
            let mut user_rows = Vec::with_capacity(users.len());
            for user in &users {
                let filter = PointFilter::for_user(*user.id())
                    .in_category(*category.id())
                    .within(window);
                let breakdown = self.signed_breakdown(filter).await?;
                user_rows.push(UserBreakdown {
                    user: user.clone(),
                    breakdown,
                });
            }
            rows.push(CategoryBreakdownRow {
                category,
                users: user_rows,
            });
        }

        debug!(
            categories = rows.len(),
            users = users.len(),
            "computed category breakdown"
        );
        Ok(CategoryBreakdownReport {
            window,
            categories: rows,
        })
    }

    /// Each user's signed total over the seven days from `week_start`.
    pub async fn weekly_totals(&self, week_start: Timestamp) -> Result<WeeklyTotals, LedgerError> {
        let window = TimeWindow::week_from(week_start);
        let users = self.reader.list_users().await?;

        let mut totals = Vec::with_capacity(users.len());
        for user in users {
            let total = self
                .reader
                .sum_points(&PointFilter::for_user(*user.id()).within(window))
                .await?;
            totals.push(UserTotal { user, total });
        }

        Ok(WeeklyTotals {
            week_start,
            range: self.settings.calendar.range_label(week_start),
            users: totals,
        })
    }

    /// Today's `{neg, pos, new}` for every user.
    pub async fn daily_summary(&self, now: Timestamp) -> Result<DailySummary, LedgerError> {
        let day_start = self.settings.calendar.start_of_day(now);
        let new_since = std::cmp::max(day_start, now.plus(-self.settings.new_point_window));
        let users = self.reader.list_users().await?;

        let mut summaries = Vec::with_capacity(users.len());
        for user in users {
            summaries.push(self.user_day(user, day_start, new_since).await?);
        }

        Ok(DailySummary {
            day_start,
            new_since,
            users: summaries,
        })
    }

    /// Cash-out figures for one user.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user does not exist
    pub async fn reward_balance(&self, user_id: &UserId) -> Result<RewardBalance, LedgerError> {
        if self.reader.find_user(user_id).await?.is_none() {
            return Err(LedgerError::not_found(EntityKind::User, user_id));
        }

        let points_total = self
            .reader
            .sum_points(&PointFilter::for_user(*user_id))
            .await?;
        let rewards_total = self
            .reader
            .sum_rewards(&RewardFilter::for_user(*user_id))
            .await?;

        Ok(RewardBalance::from_totals(points_total, rewards_total))
    }

    async fn user_day(
        &self,
        user: User,
        day_start: Timestamp,
        new_since: Timestamp,
    ) -> Result<DailyUserSummary, LedgerError> {
        let today = PointFilter::for_user(*user.id()).within(TimeWindow::since(day_start));
        let breakdown = self.signed_breakdown(today).await?;
        let new = self
            .reader
            .sum_points(&today.within(TimeWindow::since(new_since)))
            .await?;

        Ok(DailyUserSummary {
            user,
            neg: breakdown.neg,
            pos: breakdown.pos,
            new,
        })
    }

    async fn signed_breakdown(&self, filter: PointFilter) -> Result<SignedBreakdown, LedgerError> {
        let negative = self
            .reader
            .sum_points(&filter.with_sign(ValueSign::Negative))
            .await?;
        let non_negative = self
            .reader
            .sum_points(&filter.with_sign(ValueSign::NonNegative))
            .await?;
        Ok(SignedBreakdown::from_sums(negative, non_negative))
    }
}
