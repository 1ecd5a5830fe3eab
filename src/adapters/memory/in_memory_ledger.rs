//! In-memory ledger implementation.
//!
//! Implements both ledger ports over plain vectors. Used by the test suite
//! and when the service starts without a database. Referential integrity
//! is enforced the same way the PostgreSQL schema enforces it. Nothing
//! survives a restart.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, UserId};
use crate::domain::ledger::{Category, Point, Reward, User};
use crate::ports::{LedgerReader, LedgerRepository, PointFilter, RewardFilter};

#[derive(Debug, Default)]
struct LedgerState {
    users: Vec<User>,
    categories: Vec<Category>,
    points: Vec<Point>,
    rewards: Vec<Reward>,
}

impl LedgerState {
    fn has_user(&self, id: &UserId) -> bool {
        self.users.iter().any(|u| u.id() == id)
    }

    fn has_category(&self, id: &CategoryId) -> bool {
        self.categories.iter().any(|c| c.id() == id)
    }

    fn check_point_references(&self, point: &Point) -> Result<(), DomainError> {
        if !self.has_user(point.user_id()) {
            return Err(DomainError::missing_reference("user_id", point.user_id()));
        }
        if !self.has_category(point.category_id()) {
            return Err(DomainError::missing_reference(
                "category_id",
                point.category_id(),
            ));
        }
        Ok(())
    }
}

/// Thread-safe in-memory ledger.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored points.
    pub fn point_count(&self) -> usize {
        self.state.lock().map(|s| s.points.len()).unwrap_or(0)
    }

    /// Number of stored rewards.
    pub fn reward_count(&self) -> usize {
        self.state.lock().map(|s| s.rewards.len()).unwrap_or(0)
    }

    fn state(&self) -> Result<MutexGuard<'_, LedgerState>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Ledger lock poisoned"))
    }
}

fn user_not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
        .with_detail("id", id.to_string())
}

fn category_not_found(id: &CategoryId) -> DomainError {
    DomainError::new(
        ErrorCode::CategoryNotFound,
        format!("Category not found: {}", id),
    )
    .with_detail("id", id.to_string())
}

#[async_trait]
impl LedgerReader for InMemoryLedger {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state()?.users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_category(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        Ok(self
            .state()?
            .categories
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.state()?.users.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.state()?.categories.clone())
    }

    async fn list_points(&self, filter: &PointFilter) -> Result<Vec<Point>, DomainError> {
        Ok(self
            .state()?
            .points
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn list_rewards(&self, filter: &RewardFilter) -> Result<Vec<Reward>, DomainError> {
        Ok(self
            .state()?
            .rewards
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn sum_points(&self, filter: &PointFilter) -> Result<i64, DomainError> {
        Ok(self
            .state()?
            .points
            .iter()
            .filter(|p| filter.matches(p))
            .map(|p| i64::from(p.value()))
            .sum())
    }

    async fn sum_rewards(&self, filter: &RewardFilter) -> Result<i64, DomainError> {
        Ok(self
            .state()?
            .rewards
            .iter()
            .filter(|r| filter.matches(r))
            .map(|r| i64::from(r.value()))
            .sum())
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedger {
    async fn save_user(&self, user: &User) -> Result<(), DomainError> {
        self.state()?.users.push(user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.state()?;
        let slot = state
            .users
            .iter_mut()
            .find(|u| u.id() == user.id())
            .ok_or_else(|| user_not_found(user.id()))?;
        *slot = user.clone();
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError> {
        let mut state = self.state()?;
        if !state.has_user(id) {
            return Err(user_not_found(id));
        }
        let referenced = state.points.iter().any(|p| p.user_id() == id)
            || state.rewards.iter().any(|r| r.user_id() == id);
        if referenced {
            return Err(DomainError::new(
                ErrorCode::ReferenceInUse,
                format!("User {} still has points or rewards", id),
            ));
        }
        state.users.retain(|u| u.id() != id);
        Ok(())
    }

    async fn save_category(&self, category: &Category) -> Result<(), DomainError> {
        self.state()?.categories.push(category.clone());
        Ok(())
    }

    async fn update_category(&self, category: &Category) -> Result<(), DomainError> {
        let mut state = self.state()?;
        let slot = state
            .categories
            .iter_mut()
            .find(|c| c.id() == category.id())
            .ok_or_else(|| category_not_found(category.id()))?;
        *slot = category.clone();
        Ok(())
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), DomainError> {
        let mut state = self.state()?;
        if !state.has_category(id) {
            return Err(category_not_found(id));
        }
        if state.points.iter().any(|p| p.category_id() == id) {
            return Err(DomainError::new(
                ErrorCode::ReferenceInUse,
                format!("Category {} still has points", id),
            ));
        }
        state.categories.retain(|c| c.id() != id);
        Ok(())
    }

    async fn save_point(&self, point: &Point) -> Result<(), DomainError> {
        let mut state = self.state()?;
        state.check_point_references(point)?;
        state.points.push(point.clone());
        Ok(())
    }

    async fn save_points_atomically(&self, points: &[Point]) -> Result<(), DomainError> {
        let mut state = self.state()?;
        for point in points {
            state.check_point_references(point)?;
        }
        state.points.extend_from_slice(points);
        Ok(())
    }

    async fn save_reward(&self, reward: &Reward) -> Result<(), DomainError> {
        let mut state = self.state()?;
        if !state.has_user(reward.user_id()) {
            return Err(DomainError::missing_reference("user_id", reward.user_id()));
        }
        state.rewards.push(reward.clone());
        Ok(())
    }
}
