//! PostgreSQL implementation of LedgerReader.
//!
//! Sums are computed in the database with `COALESCE(SUM(value), 0)` so an
//! empty match yields zero rather than NULL.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::foundation::{CategoryId, DomainError, UserId};
use crate::domain::ledger::{Category, Point, Reward, User};
use crate::ports::{LedgerReader, PointFilter, RewardFilter};

use super::rows::{
    db_error, push_point_filter, push_reward_filter, row_to_category, row_to_point,
    row_to_reward, row_to_user,
};

/// PostgreSQL implementation of LedgerReader.
#[derive(Clone)]
pub struct PostgresLedgerReader {
    pool: PgPool,
}

impl PostgresLedgerReader {
    /// Creates a new PostgresLedgerReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerReader for PostgresLedgerReader {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM users WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch user"))?;

        row.map(row_to_user).transpose()
    }

    async fn find_category(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, value, created_at, updated_at
            FROM categories WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch category"))?;

        row.map(row_to_category).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list users"))?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, value, created_at, updated_at
            FROM categories
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list categories"))?;

        rows.into_iter().map(row_to_category).collect()
    }

    async fn list_points(&self, filter: &PointFilter) -> Result<Vec<Point>, DomainError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, user_id, category_id, value, created_at FROM points WHERE TRUE",
        );
        push_point_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at, id");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list points"))?;

        rows.into_iter().map(row_to_point).collect()
    }

    async fn list_rewards(&self, filter: &RewardFilter) -> Result<Vec<Reward>, DomainError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, user_id, value, created_at FROM rewards WHERE TRUE",
        );
        push_reward_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at, id");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list rewards"))?;

        rows.into_iter().map(row_to_reward).collect()
    }

    async fn sum_points(&self, filter: &PointFilter) -> Result<i64, DomainError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COALESCE(SUM(value), 0)::BIGINT FROM points WHERE TRUE",
        );
        push_point_filter(&mut qb, filter);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("sum points"))
    }

    async fn sum_rewards(&self, filter: &RewardFilter) -> Result<i64, DomainError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COALESCE(SUM(value), 0)::BIGINT FROM rewards WHERE TRUE",
        );
        push_reward_filter(&mut qb, filter);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("sum rewards"))
    }
}
