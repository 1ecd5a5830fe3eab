//! Read models produced by the history queries.
//!
//! Mappings keyed by category and user are materialised as ordered rows
//! (categories outer, users inner) so they serialise without struct keys.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, Timestamp, UserId};
use crate::domain::ledger::{Category, User};

use super::{SignedBreakdown, TimeWindow};

/// One user's breakdown inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBreakdown {
    pub user: User,
    #[serde(flatten)]
    pub breakdown: SignedBreakdown,
}

/// All users' breakdowns for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdownRow {
    pub category: Category,
    pub users: Vec<UserBreakdown>,
}

/// Category → User → `{neg, pos}` over one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdownReport {
    pub window: TimeWindow,
    pub categories: Vec<CategoryBreakdownRow>,
}

impl CategoryBreakdownReport {
    /// Breakdown for a pair; unknown pairs read as zero.
    pub fn get(&self, category_id: &CategoryId, user_id: &UserId) -> SignedBreakdown {
        self.categories
            .iter()
            .find(|row| row.category.id() == category_id)
            .and_then(|row| row.users.iter().find(|u| u.user.id() == user_id))
            .map(|u| u.breakdown)
            .unwrap_or_default()
    }
}

/// One user's signed total for a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTotal {
    pub user: User,
    pub total: i64,
}

/// User → total for the seven days starting at `week_start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTotals {
    pub week_start: Timestamp,
    /// `MM/DD - MM/DD`
    pub range: String,
    pub users: Vec<UserTotal>,
}

impl WeeklyTotals {
    pub fn total_for(&self, user_id: &UserId) -> i64 {
        self.users
            .iter()
            .find(|u| u.user.id() == user_id)
            .map_or(0, |u| u.total)
    }
}

/// Everything the weekly history page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHistory {
    pub breakdown: CategoryBreakdownReport,
    pub totals: WeeklyTotals,
}

/// Today's figures for one user on the live dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUserSummary {
    pub user: User,
    pub neg: i64,
    pub pos: i64,
    /// Sum of values logged within the "new" lookback.
    pub new: i64,
}

/// User → today's `{neg, pos, new}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub day_start: Timestamp,
    pub new_since: Timestamp,
    pub users: Vec<DailyUserSummary>,
}

impl DailySummary {
    pub fn for_user(&self, user_id: &UserId) -> Option<&DailyUserSummary> {
        self.users.iter().find(|u| u.user.id() == user_id)
    }
}

/// Cash-out figures for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBalance {
    pub cashed_out: i64,
    pub remaining: i64,
}

impl RewardBalance {
    /// `remaining` is every point ever logged minus every reward redeemed.
    pub fn from_totals(points_total: i64, rewards_total: i64) -> Self {
        Self {
            cashed_out: rewards_total,
            remaining: points_total - rewards_total,
        }
    }
}
