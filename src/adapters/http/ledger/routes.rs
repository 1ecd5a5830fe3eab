//! Axum router configuration for ledger endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{
    cash_out, create_category, create_user, delete_category, delete_user, get_category, get_user,
    list_categories, list_points, list_rewards, point_form, reward_balance, submit_points,
    update_category, update_user, users_dashboard,
};
use crate::adapters::http::state::AppState;

/// Create the ledger API router.
///
/// # Routes
///
/// - `GET|POST /api/users`
/// - `GET|PATCH|DELETE /api/users/:user_id`
/// - `GET|POST /api/users/:user_id/points`, `GET .../points/new`
/// - `GET|POST /api/users/:user_id/rewards`, `GET .../rewards/new`
/// - `GET|POST /api/categories`
/// - `GET|PATCH|DELETE /api/categories/:category_id`
pub fn ledger_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(users_dashboard).post(create_user))
        .route(
            "/api/users/:user_id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route(
            "/api/users/:user_id/points",
            get(list_points).post(submit_points),
        )
        .route("/api/users/:user_id/points/new", get(point_form))
        .route(
            "/api/users/:user_id/rewards",
            get(list_rewards).post(cash_out),
        )
        .route("/api/users/:user_id/rewards/new", get(reward_balance))
        .route(
            "/api/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/categories/:category_id",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
}
