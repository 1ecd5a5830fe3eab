//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `LedgerReader` - lookups, listings and filtered sums (read side)
//! - `LedgerRepository` - row persistence (write side)

mod ledger_reader;
mod ledger_repository;

pub use ledger_reader::{LedgerReader, PointFilter, RewardFilter};
pub use ledger_repository::LedgerRepository;
