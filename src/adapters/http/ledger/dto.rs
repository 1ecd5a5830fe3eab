//! HTTP DTOs for user, category, point and reward endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::handlers::ledger::{PointEntry, PointForm, UserPoints, UserRewards};
use crate::domain::foundation::{CategoryId, PointId, RewardId, Timestamp, UserId};
use crate::domain::history::RewardBalance;
use crate::domain::ledger::{Category, Point, Reward, User};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub value: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub value: Option<i32>,
}

/// Batch of `category id -> value` pairs.
///
/// Values may be JSON numbers or strings. They are passed on as text and
/// parsed per entry, so one bad value does not reject the whole body and
/// `5.0` is accepted like `5`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPointsRequest {
    pub points: BTreeMap<String, serde_json::Value>,
}

impl SubmitPointsRequest {
    /// Entries in category key order.
    pub fn into_entries(self) -> Vec<PointEntry> {
        self.points
            .into_iter()
            .map(|(category, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                PointEntry { category, value }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CashOutRequest {
    pub value: i32,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct PointResponse {
    pub id: PointId,
    pub category_id: CategoryId,
    pub value: i32,
    pub created_at: Timestamp,
}

impl From<&Point> for PointResponse {
    fn from(point: &Point) -> Self {
        Self {
            id: *point.id(),
            category_id: *point.category_id(),
            value: point.value(),
            created_at: *point.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RewardResponse {
    pub id: RewardId,
    pub value: i32,
    pub created_at: Timestamp,
}

impl From<&Reward> for RewardResponse {
    fn from(reward: &Reward) -> Self {
        Self {
            id: *reward.id(),
            value: reward.value(),
            created_at: *reward.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPointsResponse {
    pub user: User,
    pub points: Vec<PointResponse>,
}

impl From<UserPoints> for UserPointsResponse {
    fn from(result: UserPoints) -> Self {
        Self {
            points: result.points.iter().map(PointResponse::from).collect(),
            user: result.user,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRewardsResponse {
    pub user: User,
    pub rewards: Vec<RewardResponse>,
}

impl From<UserRewards> for UserRewardsResponse {
    fn from(result: UserRewards) -> Self {
        Self {
            rewards: result.rewards.iter().map(RewardResponse::from).collect(),
            user: result.user,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PointFormResponse {
    pub user: User,
    pub categories: Vec<Category>,
}

impl From<PointForm> for PointFormResponse {
    fn from(form: PointForm) -> Self {
        Self {
            user: form.user,
            categories: form.categories,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitPointsResponse {
    pub saved: usize,
    pub points: Vec<PointResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RewardBalanceResponse {
    pub user_id: UserId,
    #[serde(flatten)]
    pub balance: RewardBalance,
}
