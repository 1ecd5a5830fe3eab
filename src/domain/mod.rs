//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamp, errors)
//! - `ledger` - Users, categories, points and rewards
//! - `history` - Windows, calendars and the derived report types

pub mod foundation;
pub mod history;
pub mod ledger;
