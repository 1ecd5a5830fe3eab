//! Per-user activity queries: logged points, rewards and the form data
//! needed to log new points.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::ledger::{Category, EntityKind, LedgerError, Point, Reward, User};
use crate::ports::{LedgerReader, PointFilter, RewardFilter};

/// Query scoped to one user.
#[derive(Debug, Clone, Copy)]
pub struct UserActivityQuery {
    pub user_id: UserId,
}

/// A user and every point they have logged, oldest first.
#[derive(Debug, Clone)]
pub struct UserPoints {
    pub user: User,
    pub points: Vec<Point>,
}

/// A user and every reward they have redeemed, oldest first.
#[derive(Debug, Clone)]
pub struct UserRewards {
    pub user: User,
    pub rewards: Vec<Reward>,
}

/// What a client needs to render the "log points" form.
#[derive(Debug, Clone)]
pub struct PointForm {
    pub user: User,
    pub categories: Vec<Category>,
}

/// Handler for the read-only per-user views.
pub struct UserActivityHandler {
    reader: Arc<dyn LedgerReader>,
}

impl UserActivityHandler {
    pub fn new(reader: Arc<dyn LedgerReader>) -> Self {
        Self { reader }
    }

    pub async fn points(&self, query: UserActivityQuery) -> Result<UserPoints, LedgerError> {
        let user = self.load_user(&query.user_id).await?;
        let points = self
            .reader
            .list_points(&PointFilter::for_user(query.user_id))
            .await?;
        Ok(UserPoints { user, points })
    }

    pub async fn rewards(&self, query: UserActivityQuery) -> Result<UserRewards, LedgerError> {
        let user = self.load_user(&query.user_id).await?;
        let rewards = self
            .reader
            .list_rewards(&RewardFilter::for_user(query.user_id))
            .await?;
        Ok(UserRewards { user, rewards })
    }

    pub async fn point_form(&self, query: UserActivityQuery) -> Result<PointForm, LedgerError> {
        let user = self.load_user(&query.user_id).await?;
        let categories = self.reader.list_categories().await?;
        Ok(PointForm { user, categories })
    }

    async fn load_user(&self, user_id: &UserId) -> Result<User, LedgerError> {
        self.reader
            .find_user(user_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(EntityKind::User, user_id))
    }
}
