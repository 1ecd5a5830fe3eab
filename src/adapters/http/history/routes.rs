//! Axum router configuration for history endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{daily_breakdown, weekly_history};
use crate::adapters::http::state::AppState;

/// Create the history API router.
///
/// # Routes
/// - `GET /api/history` - weekly breakdown and totals (`?prior=1` for last week)
/// - `GET /api/history/today` - breakdown since local midnight
pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/api/history", get(weekly_history))
        .route("/api/history/today", get(daily_breakdown))
}
