//! Row decoding and query helpers shared by the PostgreSQL adapters.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    CategoryId, DomainError, PointId, RewardId, Timestamp, UserId,
};
use crate::domain::history::{TimeWindow, ValueSign};
use crate::domain::ledger::{Category, Point, Reward, User};
use crate::ports::{PointFilter, RewardFilter};

/// Wraps a driver error with the operation that failed.
pub(super) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", context, e))
}

fn get<'r, T>(row: &'r PgRow, column: &'static str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", column, e)))
}

fn timestamp(row: &PgRow, column: &'static str) -> Result<Timestamp, DomainError> {
    get::<DateTime<Utc>>(row, column).map(Timestamp::from_datetime)
}

pub(super) fn row_to_user(row: PgRow) -> Result<User, DomainError> {
    Ok(User::reconstitute(
        UserId::from_uuid(get::<Uuid>(&row, "id")?),
        get(&row, "name")?,
        timestamp(&row, "created_at")?,
        timestamp(&row, "updated_at")?,
    ))
}

pub(super) fn row_to_category(row: PgRow) -> Result<Category, DomainError> {
    Ok(Category::reconstitute(
        CategoryId::from_uuid(get::<Uuid>(&row, "id")?),
        get(&row, "name")?,
        get(&row, "value")?,
        timestamp(&row, "created_at")?,
        timestamp(&row, "updated_at")?,
    ))
}

pub(super) fn row_to_point(row: PgRow) -> Result<Point, DomainError> {
    Ok(Point::new(
        PointId::from_uuid(get::<Uuid>(&row, "id")?),
        UserId::from_uuid(get::<Uuid>(&row, "user_id")?),
        CategoryId::from_uuid(get::<Uuid>(&row, "category_id")?),
        get(&row, "value")?,
        timestamp(&row, "created_at")?,
    ))
}

pub(super) fn row_to_reward(row: PgRow) -> Result<Reward, DomainError> {
    Ok(Reward::new(
        RewardId::from_uuid(get::<Uuid>(&row, "id")?),
        UserId::from_uuid(get::<Uuid>(&row, "user_id")?),
        get(&row, "value")?,
        timestamp(&row, "created_at")?,
    ))
}

fn push_window(qb: &mut QueryBuilder<'_, Postgres>, window: &TimeWindow) {
    qb.push(" AND created_at >= ")
        .push_bind(*window.start.as_datetime());
    if let Some(end) = window.end {
        qb.push(" AND created_at < ").push_bind(*end.as_datetime());
    }
}

/// Appends `AND ...` clauses for every populated field of the filter.
/// The builder must already contain a `WHERE TRUE` (or equivalent).
pub(super) fn push_point_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &PointFilter) {
    if let Some(user_id) = filter.user_id {
        qb.push(" AND user_id = ").push_bind(*user_id.as_uuid());
    }
    if let Some(category_id) = filter.category_id {
        qb.push(" AND category_id = ")
            .push_bind(*category_id.as_uuid());
    }
    if let Some(window) = &filter.window {
        push_window(qb, window);
    }
    match filter.sign {
        ValueSign::Any => {}
        ValueSign::Negative => {
            qb.push(" AND value < 0");
        }
        ValueSign::NonNegative => {
            qb.push(" AND value >= 0");
        }
    }
}

pub(super) fn push_reward_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &RewardFilter) {
    if let Some(user_id) = filter.user_id {
        qb.push(" AND user_id = ").push_bind(*user_id.as_uuid());
    }
    if let Some(window) = &filter.window {
        push_window(qb, window);
    }
}

/// Maps an insert failure, turning foreign key violations into
/// `ReferenceNotFound` on the given column.
pub(super) fn insert_error(
    context: &'static str,
    reference_field: &'static str,
) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| match e.as_database_error() {
        Some(db) if db.is_foreign_key_violation() => DomainError::new(
            crate::domain::foundation::ErrorCode::ReferenceNotFound,
            format!("Failed to {}: {}", context, db.message()),
        )
        .with_detail("field", reference_field),
        _ => DomainError::database(format!("Failed to {}: {}", context, e)),
    }
}
