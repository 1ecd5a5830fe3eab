//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod history;
pub mod ledger;

pub use history::{
    AggregationEngine, AggregationSettings, GetDailyBreakdownHandler, GetDailyBreakdownQuery,
    GetDailySummaryHandler, GetDailySummaryQuery, GetRewardBalanceHandler, GetRewardBalanceQuery,
    GetWeeklyHistoryHandler, GetWeeklyHistoryQuery, DEFAULT_NEW_POINT_WINDOW_SECS,
};
pub use ledger::{
    BatchPolicy, CashOutCommand, CashOutHandler, CreateCategoryCommand, CreateCategoryHandler,
    CreateUserCommand, CreateUserHandler, DeleteCategoryCommand, DeleteCategoryHandler,
    DeleteUserCommand, DeleteUserHandler, GetCategoryHandler, GetCategoryQuery, GetUserHandler,
    GetUserQuery, ListCategoriesHandler, PointEntry, PointForm, RenameUserCommand,
    RenameUserHandler, SubmitPointsCommand, SubmitPointsHandler, SubmitPointsResult,
    UpdateCategoryCommand, UpdateCategoryHandler, UserActivityHandler, UserActivityQuery,
    UserPoints, UserRewards,
};
