//! Ledger command and query handlers.
//!
//! Commands write users, categories, points and rewards; the queries here
//! return raw rows. Derived figures live in `handlers::history`.

mod activity;
mod cash_out;
mod categories;
mod submit_points;
mod users;

pub use activity::{PointForm, UserActivityHandler, UserActivityQuery, UserPoints, UserRewards};
pub use cash_out::{CashOutCommand, CashOutHandler};
pub use categories::{
    CreateCategoryCommand, CreateCategoryHandler, DeleteCategoryCommand, DeleteCategoryHandler,
    GetCategoryHandler, GetCategoryQuery, ListCategoriesHandler, UpdateCategoryCommand,
    UpdateCategoryHandler,
};
pub use submit_points::{
    BatchPolicy, PointEntry, SubmitPointsCommand, SubmitPointsHandler, SubmitPointsResult,
};
pub use users::{
    CreateUserCommand, CreateUserHandler, DeleteUserCommand, DeleteUserHandler, GetUserHandler,
    GetUserQuery, RenameUserCommand, RenameUserHandler,
};
