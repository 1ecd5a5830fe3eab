//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - PostgreSQL ledger (sqlx)
//! - `memory` - in-memory ledger for tests and database-less runs
//! - `http` - axum REST API

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::InMemoryLedger;
pub use postgres::{PostgresLedgerReader, PostgresLedgerRepository};
