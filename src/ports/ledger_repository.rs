//! Ledger repository port (write side).
//!
//! Persists ledger rows. The store owns referential integrity: saving a
//! point or reward whose user or category is missing fails with
//! `ReferenceNotFound`, and deleting a user or category that rows still
//! reference fails with `ReferenceInUse`.

use async_trait::async_trait;

use crate::domain::foundation::{CategoryId, DomainError, UserId};
use crate::domain::ledger::{Category, Point, Reward, User};

/// Repository port for ledger persistence.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Save a new user.
    async fn save_user(&self, user: &User) -> Result<(), DomainError>;

    /// Update an existing user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn update_user(&self, user: &User) -> Result<(), DomainError>;

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `ReferenceInUse` if points or rewards still reference it
    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError>;

    /// Save a new category.
    async fn save_category(&self, category: &Category) -> Result<(), DomainError>;

    /// Update an existing category.
    ///
    /// # Errors
    ///
    /// - `CategoryNotFound` if the category doesn't exist
    async fn update_category(&self, category: &Category) -> Result<(), DomainError>;

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// - `CategoryNotFound` if the category doesn't exist
    /// - `ReferenceInUse` if points still reference it
    async fn delete_category(&self, id: &CategoryId) -> Result<(), DomainError>;

    /// Save one point.
    ///
    /// # Errors
    ///
    /// - `ReferenceNotFound` if its user or category is missing
    async fn save_point(&self, point: &Point) -> Result<(), DomainError>;

    /// Save several points in one transaction. Either all rows are written
    /// or none are.
    async fn save_points_atomically(&self, points: &[Point]) -> Result<(), DomainError>;

    /// Save one reward.
    ///
    /// # Errors
    ///
    /// - `ReferenceNotFound` if its user is missing
    async fn save_reward(&self, reward: &Reward) -> Result<(), DomainError>;
}
