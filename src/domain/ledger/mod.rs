//! Ledger domain module.
//!
//! The raw rows of the system: users, categories, points and rewards.
//! Rows are never summarised in place; see `domain::history` for the
//! derived views.

mod category;
mod errors;
mod point;
mod reward;
mod user;

pub use category::{Category, MAX_CATEGORY_NAME_LENGTH};
pub use errors::{EntityKind, EntryFailure, LedgerError};
pub use point::{parse_point_value, Point};
pub use reward::Reward;
pub use user::{User, MAX_USER_NAME_LENGTH};
