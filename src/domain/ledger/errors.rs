//! Ledger-specific error types.

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Which kind of row a not-found error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Category,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::User => write!(f, "User"),
            EntityKind::Category => write!(f, "Category"),
        }
    }
}

/// One rejected entry of a batch point submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    /// The submitted category key, verbatim.
    pub category: String,
    pub message: String,
}

/// Ledger-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Referenced user or category does not exist.
    NotFound { entity: EntityKind, id: String },
    /// Input violated a field constraint; nothing was written.
    ValidationFailed { field: String, message: String },
    /// Some entries of a batch were persisted, others were rejected.
    PartialBatchFailure {
        saved: usize,
        failures: Vec<EntryFailure>,
    },
    /// Delete blocked because other rows still reference the target.
    Conflict(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl LedgerError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        LedgerError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        LedgerError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        LedgerError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::NotFound {
                entity: EntityKind::User,
                ..
            } => ErrorCode::UserNotFound,
            LedgerError::NotFound {
                entity: EntityKind::Category,
                ..
            } => ErrorCode::CategoryNotFound,
            LedgerError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            LedgerError::PartialBatchFailure { .. } => ErrorCode::ValidationFailed,
            LedgerError::Conflict(_) => ErrorCode::ReferenceInUse,
            LedgerError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            LedgerError::NotFound { entity, id } => format!("{} not found: {}", entity, id),
            LedgerError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            LedgerError::PartialBatchFailure { saved, failures } => format!(
                "{} of {} entries failed; {} saved",
                failures.len(),
                saved + failures.len(),
                saved
            ),
            LedgerError::Conflict(msg) => format!("Conflict: {}", msg),
            LedgerError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LedgerError {}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for LedgerError {
    fn from(err: DomainError) -> Self {
        let field = err.detail("field").unwrap_or("unknown").to_string();
        match err.code {
            ErrorCode::UserNotFound => LedgerError::NotFound {
                entity: EntityKind::User,
                id: err.detail("id").unwrap_or_default().to_string(),
            },
            ErrorCode::CategoryNotFound => LedgerError::NotFound {
                entity: EntityKind::Category,
                id: err.detail("id").unwrap_or_default().to_string(),
            },
            ErrorCode::ValidationFailed | ErrorCode::ReferenceNotFound => {
                LedgerError::ValidationFailed {
                    field,
                    message: err.message,
                }
            }
            ErrorCode::ReferenceInUse => LedgerError::Conflict(err.message),
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                LedgerError::Infrastructure(err.to_string())
            }
        }
    }
}
