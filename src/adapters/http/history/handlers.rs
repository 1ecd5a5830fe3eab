//! HTTP handlers for history endpoints.

use axum::extract::{Json, Query, State};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::history::{GetDailyBreakdownQuery, GetWeeklyHistoryQuery};
use crate::domain::foundation::Timestamp;

use super::dto::{CategoryBreakdownReport, HistoryParams, WeeklyHistory};

/// GET /api/history?prior=<flag>
///
/// Category breakdown and per-user totals for the current or prior week.
pub async fn weekly_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<WeeklyHistory>, ApiError> {
    let query = GetWeeklyHistoryQuery {
        now: Timestamp::now(),
        week: params.week(),
    };
    Ok(Json(state.weekly_history_handler().handle(query).await?))
}

/// GET /api/history/today
pub async fn daily_breakdown(
    State(state): State<AppState>,
) -> Result<Json<CategoryBreakdownReport>, ApiError> {
    let query = GetDailyBreakdownQuery {
        now: Timestamp::now(),
    };
    Ok(Json(state.daily_breakdown_handler().handle(query).await?))
}
