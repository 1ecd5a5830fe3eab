//! PostgreSQL implementation of LedgerRepository.
//!
//! Referential integrity comes from the schema's foreign keys; violations
//! are translated into `ReferenceNotFound` (insert) or `ReferenceInUse`
//! (delete).

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, UserId};
use crate::domain::ledger::{Category, Point, Reward, User};
use crate::ports::LedgerRepository;

use super::rows::{db_error, insert_error};

const INSERT_POINT: &str = r#"
    INSERT INTO points (id, user_id, category_id, value, created_at)
    VALUES ($1, $2, $3, $4, $5)
"#;

/// PostgreSQL implementation of LedgerRepository.
#[derive(Clone)]
pub struct PostgresLedgerRepository {
    pool: PgPool,
}

impl PostgresLedgerRepository {
    /// Creates a new PostgresLedgerRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn delete_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| match e.as_database_error() {
        Some(db) if db.is_foreign_key_violation() => DomainError::new(
            ErrorCode::ReferenceInUse,
            format!("Failed to {}: row is still referenced", context),
        ),
        _ => DomainError::database(format!("Failed to {}: {}", context, e)),
    }
}

fn point_reference_field(e: &sqlx::Error) -> &'static str {
    match e.as_database_error().and_then(|db| db.constraint()) {
        Some(constraint) if constraint.contains("user") => "user_id",
        _ => "category_id",
    }
}

fn point_insert_error(e: sqlx::Error) -> DomainError {
    let field = point_reference_field(&e);
    insert_error("insert point", field)(e)
}

#[async_trait]
impl LedgerRepository for PostgresLedgerRepository {
    async fn save_user(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name())
        .bind(user.created_at().as_datetime())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert user"))?;

        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update user"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id()),
            )
            .with_detail("id", user.id().to_string()));
        }

        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(delete_error("delete user"))?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
                    .with_detail("id", id.to_string()),
            );
        }

        Ok(())
    }

    async fn save_category(&self, category: &Category) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, value, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(category.id().as_uuid())
        .bind(category.name())
        .bind(category.value())
        .bind(category.created_at().as_datetime())
        .bind(category.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert category"))?;

        Ok(())
    }

    async fn update_category(&self, category: &Category) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE categories SET
                name = $2,
                value = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(category.id().as_uuid())
        .bind(category.name())
        .bind(category.value())
        .bind(category.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update category"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                format!("Category not found: {}", category.id()),
            )
            .with_detail("id", category.id().to_string()));
        }

        Ok(())
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(delete_error("delete category"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                format!("Category not found: {}", id),
            )
            .with_detail("id", id.to_string()));
        }

        Ok(())
    }

    async fn save_point(&self, point: &Point) -> Result<(), DomainError> {
        sqlx::query(INSERT_POINT)
            .bind(point.id().as_uuid())
            .bind(point.user_id().as_uuid())
            .bind(point.category_id().as_uuid())
            .bind(point.value())
            .bind(point.created_at().as_datetime())
            .execute(&self.pool)
            .await
            .map_err(point_insert_error)?;

        Ok(())
    }

    async fn save_points_atomically(&self, points: &[Point]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin point batch"))?;

        for point in points {
            sqlx::query(INSERT_POINT)
                .bind(point.id().as_uuid())
                .bind(point.user_id().as_uuid())
                .bind(point.category_id().as_uuid())
                .bind(point.value())
                .bind(point.created_at().as_datetime())
                .execute(&mut *tx)
                .await
                .map_err(point_insert_error)?;
        }

        // Dropping `tx` on an early return rolls the batch back.
        tx.commit().await.map_err(db_error("commit point batch"))?;
        Ok(())
    }

    async fn save_reward(&self, reward: &Reward) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO rewards (id, user_id, value, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(reward.id().as_uuid())
        .bind(reward.user_id().as_uuid())
        .bind(reward.value())
        .bind(reward.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(insert_error("insert reward", "user_id"))?;

        Ok(())
    }
}
