//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter for endpoint exposure; `app_router`
//! merges them behind the shared middleware stack.

pub mod error;
pub mod history;
pub mod ledger;
mod router;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::app_router;
pub use state::AppState;
