//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the timestamp value object, and the error types
//! that form the vocabulary of the ledger.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CategoryId, PointId, RewardId, UserId};
pub use timestamp::Timestamp;
