//! HTTP handlers for user, category, point and reward endpoints.
//!
//! These handlers connect Axum routes to application layer handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;

use crate::application::handlers::history::{GetDailySummaryQuery, GetRewardBalanceQuery};
use crate::application::handlers::ledger::{
    CashOutCommand, CreateCategoryCommand, CreateUserCommand, DeleteCategoryCommand,
    DeleteUserCommand, GetCategoryQuery, GetUserQuery, RenameUserCommand, SubmitPointsCommand,
    UpdateCategoryCommand, UserActivityQuery,
};
use crate::domain::foundation::{CategoryId, Timestamp, UserId};
use crate::domain::history::DailySummary;
use crate::domain::ledger::{Category, Reward, User};

use super::dto::{
    CashOutRequest, CreateCategoryRequest, CreateUserRequest, PointFormResponse, PointResponse,
    RewardBalanceResponse, SubmitPointsRequest, SubmitPointsResponse, UpdateCategoryRequest,
    UpdateUserRequest, UserPointsResponse, UserRewardsResponse,
};
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::state::AppState;

fn user_id(raw: &str) -> Result<UserId, ApiError> {
    parse_id(raw, "user")
}

fn category_id(raw: &str) -> Result<CategoryId, ApiError> {
    parse_id(raw, "category")
}

// ════════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/users
///
/// Today's `{neg, pos, new}` for every user. Clients poll this.
pub async fn users_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DailySummary>, ApiError> {
    let query = GetDailySummaryQuery {
        now: Timestamp::now(),
    };
    let summary = state.daily_summary_handler().handle(query).await?;
    Ok(Json(summary))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(request) = payload?;
    let user = state
        .create_user_handler()
        .handle(CreateUserCommand { name: request.name })
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let query = GetUserQuery {
        user_id: user_id(&raw_id)?,
    };
    Ok(Json(state.get_user_handler().handle(query).await?))
}

/// PATCH /api/users/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let user_id = user_id(&raw_id)?;
    let Json(request) = payload?;
    let user = state
        .rename_user_handler()
        .handle(RenameUserCommand {
            user_id,
            name: request.name,
        })
        .await?;
    Ok(Json(user))
}

/// DELETE /api/users/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let cmd = DeleteUserCommand {
        user_id: user_id(&raw_id)?,
    };
    state.delete_user_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Categories
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.list_categories_handler().handle().await?))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let Json(request) = payload?;
    let category = state
        .create_category_handler()
        .handle(CreateCategoryCommand {
            name: request.name,
            value: request.value,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/categories/:category_id
pub async fn get_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let query = GetCategoryQuery {
        category_id: category_id(&raw_id)?,
    };
    Ok(Json(state.get_category_handler().handle(query).await?))
}

/// PATCH /api/categories/:category_id
pub async fn update_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> Result<Json<Category>, ApiError> {
    let category_id = category_id(&raw_id)?;
    let Json(request) = payload?;
    let category = state
        .update_category_handler()
        .handle(UpdateCategoryCommand {
            category_id,
            name: request.name,
            value: request.value,
        })
        .await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:category_id
pub async fn delete_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let cmd = DeleteCategoryCommand {
        category_id: category_id(&raw_id)?,
    };
    state.delete_category_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Points
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/users/:user_id/points
pub async fn list_points(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserPointsResponse>, ApiError> {
    let query = UserActivityQuery {
        user_id: user_id(&raw_id)?,
    };
    let result = state.user_activity_handler().points(query).await?;
    Ok(Json(result.into()))
}

/// GET /api/users/:user_id/points/new
///
/// The user plus every category, for rendering a "log points" form.
pub async fn point_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PointFormResponse>, ApiError> {
    let query = UserActivityQuery {
        user_id: user_id(&raw_id)?,
    };
    let form = state.user_activity_handler().point_form(query).await?;
    Ok(Json(form.into()))
}

/// POST /api/users/:user_id/points
pub async fn submit_points(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<SubmitPointsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitPointsResponse>), ApiError> {
    let user_id = user_id(&raw_id)?;
    let Json(request) = payload?;

    let cmd = SubmitPointsCommand {
        user_id,
        entries: request.into_entries(),
        submitted_at: Timestamp::now(),
    };
    let result = state.submit_points_handler().handle(cmd).await?;

    let points: Vec<PointResponse> = result.points.iter().map(PointResponse::from).collect();
    Ok((
        StatusCode::CREATED,
        Json(SubmitPointsResponse {
            saved: points.len(),
            points,
        }),
    ))
}

// ════════════════════════════════════════════════════════════════════════════════
// Rewards
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/users/:user_id/rewards
pub async fn list_rewards(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserRewardsResponse>, ApiError> {
    let query = UserActivityQuery {
        user_id: user_id(&raw_id)?,
    };
    let result = state.user_activity_handler().rewards(query).await?;
    Ok(Json(result.into()))
}

/// GET /api/users/:user_id/rewards/new
///
/// Cash-out figures shown before redeeming.
pub async fn reward_balance(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<RewardBalanceResponse>, ApiError> {
    let user_id = user_id(&raw_id)?;
    let balance = state
        .reward_balance_handler()
        .handle(GetRewardBalanceQuery { user_id })
        .await?;
    Ok(Json(RewardBalanceResponse { user_id, balance }))
}

/// POST /api/users/:user_id/rewards
pub async fn cash_out(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<CashOutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Reward>), ApiError> {
    let user_id = user_id(&raw_id)?;
    let Json(request) = payload?;
    let reward = state
        .cash_out_handler()
        .handle(CashOutCommand {
            user_id,
            value: request.value,
            cashed_out_at: Timestamp::now(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(reward)))
}
