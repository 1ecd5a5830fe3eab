//! Ledger HTTP adapter module.
//!
//! CRUD endpoints for users and categories, plus point logging and
//! cash-outs.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::ledger_routes;
