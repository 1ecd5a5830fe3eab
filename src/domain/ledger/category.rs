//! Category entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, Timestamp, ValidationError};

/// Maximum length for a category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// A named grouping of points.
///
/// `value` is the suggested weight offered when logging a point in this
/// category. It never affects aggregation; points carry their own value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    value: i32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Category {
    /// Creates a new category.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the trimmed name is empty
    /// - `OutOfRange` if the name is too long
    pub fn new(
        id: CategoryId,
        name: &str,
        value: i32,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        Ok(Self {
            id,
            name,
            value,
            created_at,
            updated_at: created_at,
        })
    }

    /// Reconstitute a category from persistence (no validation).
    pub fn reconstitute(
        id: CategoryId,
        name: String,
        value: i32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            value,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Applies a partial update. Fields left as `None` are untouched.
    pub fn apply_changes(
        &mut self,
        name: Option<&str>,
        value: Option<i32>,
        at: Timestamp,
    ) -> Result<(), ValidationError> {
        let name = name.map(validate_name).transpose()?;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(value) = value {
            self.value = value;
        }
        self.updated_at = at;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    let len = trimmed.chars().count();
    if len > MAX_CATEGORY_NAME_LENGTH {
        return Err(ValidationError::out_of_range(
            "name",
            1,
            MAX_CATEGORY_NAME_LENGTH as i64,
            len as i64,
        ));
    }
    Ok(trimmed.to_string())
}
