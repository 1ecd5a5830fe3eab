//! Ledger reader port (read side / CQRS queries).
//!
//! Defines the lookups and filtered sums the history queries are built
//! from. Filters are typed predicate objects; adapters translate them into
//! their own query language.
//!
//! # Contract
//!
//! - Sums over an empty match are `0`, never an error
//! - Lookups of a missing row return `Ok(None)`
//! - Listing order is stable (creation order) but carries no meaning

use async_trait::async_trait;

use crate::domain::foundation::{CategoryId, DomainError, UserId};
use crate::domain::history::{TimeWindow, ValueSign};
use crate::domain::ledger::{Category, Point, Reward, User};

/// Predicate over point rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointFilter {
    pub user_id: Option<UserId>,
    pub category_id: Option<CategoryId>,
    pub window: Option<TimeWindow>,
    pub sign: ValueSign,
}

impl PointFilter {
    /// Every point of every user.
    pub fn all() -> Self {
        Self {
            user_id: None,
            category_id: None,
            window: None,
            sign: ValueSign::Any,
        }
    }

    /// Every point of one user.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::all()
        }
    }

    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn within(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_sign(mut self, sign: ValueSign) -> Self {
        self.sign = sign;
        self
    }

    /// Checks a row against the predicate.
    pub fn matches(&self, point: &Point) -> bool {
        self.user_id.map_or(true, |id| *point.user_id() == id)
            && self.category_id.map_or(true, |id| *point.category_id() == id)
            && self.window.map_or(true, |w| w.contains(point.created_at()))
            && self.sign.matches(point.value())
    }
}

/// Predicate over reward rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardFilter {
    pub user_id: Option<UserId>,
    pub window: Option<TimeWindow>,
}

impl RewardFilter {
    /// Every reward of one user.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            window: None,
        }
    }

    pub fn within(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn matches(&self, reward: &Reward) -> bool {
        self.user_id.map_or(true, |id| *reward.user_id() == id)
            && self.window.map_or(true, |w| w.contains(reward.created_at()))
    }
}

/// Reader port for ledger queries.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Find a user by ID.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a category by ID.
    async fn find_category(&self, id: &CategoryId) -> Result<Option<Category>, DomainError>;

    /// All users.
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    /// All categories.
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;

    /// Points matching the filter, oldest first.
    async fn list_points(&self, filter: &PointFilter) -> Result<Vec<Point>, DomainError>;

    /// Rewards matching the filter, oldest first.
    async fn list_rewards(&self, filter: &RewardFilter) -> Result<Vec<Reward>, DomainError>;

    /// Signed sum of matching point values.
    async fn sum_points(&self, filter: &PointFilter) -> Result<i64, DomainError>;

    /// Signed sum of matching reward values.
    async fn sum_rewards(&self, filter: &RewardFilter) -> Result<i64, DomainError>;
}
