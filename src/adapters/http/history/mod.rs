//! History HTTP adapter module.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::history_routes;
