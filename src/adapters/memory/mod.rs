//! In-memory adapters for tests and database-less runs.

mod in_memory_ledger;

pub use in_memory_ledger::InMemoryLedger;
