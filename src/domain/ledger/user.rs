//! User entity.
//!
//! Users carry no numeric state. Every total shown for a user is derived
//! from their points and rewards at query time.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Maximum length for a user's display name.
pub const MAX_USER_NAME_LENGTH: usize = 100;

/// A person who accrues and spends points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl User {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the trimmed name is empty
    /// - `OutOfRange` if the name is too long
    pub fn new(id: UserId, name: &str, created_at: Timestamp) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        Ok(Self {
            id,
            name,
            created_at,
            updated_at: created_at,
        })
    }

    /// Reconstitute a user from persistence (no validation).
    pub fn reconstitute(
        id: UserId,
        name: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Changes the display name.
    pub fn rename(&mut self, name: &str, at: Timestamp) -> Result<(), ValidationError> {
        self.name = validate_name(name)?;
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
    if len > MAX_USER_NAME_LENGTH {
        return Err(ValidationError::out_of_range(
            "name",
            1,
            MAX_USER_NAME_LENGTH as i64,
            len as i64,
        ));
    }
    Ok(trimmed.to_string())
}
