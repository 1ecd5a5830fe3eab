//! Point entity - one signed scoring event.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, PointId, Timestamp, UserId, ValidationError};

/// One scored event for a user in a category.
///
/// Points are immutable once recorded. A negative value is a penalty, zero
/// and above count as positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    id: PointId,
    user_id: UserId,
    category_id: CategoryId,
    value: i32,
    created_at: Timestamp,
}

impl Point {
    pub fn new(
        id: PointId,
        user_id: UserId,
        category_id: CategoryId,
        value: i32,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            category_id,
            value,
            created_at,
        }
    }

    pub fn id(&self) -> &PointId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Parses a submitted point value.
///
/// Accepts an optionally signed integer with surrounding whitespace, or a
/// decimal with no fractional part (`5.0`) as a JSON number serializes.
/// Anything else, including an empty string, is rejected.
pub fn parse_point_value(field: &str, raw: &str) -> Result<i32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if let Ok(value) = trimmed.parse::<i32>() {
        return Ok(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value)
            if value.is_finite()
                && value.fract() == 0.0
                && value >= f64::from(i32::MIN)
                && value <= f64::from(i32::MAX) =>
        {
            Ok(value as i32)
        }
        _ => Err(ValidationError::invalid_format(
            field,
            format!("'{}' is not a whole number", trimmed),
        )),
    }
}
