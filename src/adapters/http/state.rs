//! Shared application state for the HTTP adapters.

use std::sync::Arc;

use crate::adapters::memory::InMemoryLedger;
use crate::application::handlers::history::{
    AggregationEngine, AggregationSettings, GetDailyBreakdownHandler, GetDailySummaryHandler,
    GetRewardBalanceHandler, GetWeeklyHistoryHandler,
};
use crate::application::handlers::ledger::{
    BatchPolicy, CashOutHandler, CreateCategoryHandler, CreateUserHandler, DeleteCategoryHandler,
    DeleteUserHandler, GetCategoryHandler, GetUserHandler, ListCategoriesHandler,
    RenameUserHandler, SubmitPointsHandler, UpdateCategoryHandler, UserActivityHandler,
};
use crate::ports::{LedgerReader, LedgerRepository};

/// Ledger ports plus the aggregation engine built over them.
///
/// Handlers are cheap to build, so each request gets fresh ones.
#[derive(Clone)]
pub struct AppState {
    pub reader: Arc<dyn LedgerReader>,
    pub repository: Arc<dyn LedgerRepository>,
    pub engine: Arc<AggregationEngine>,
    pub batch_policy: BatchPolicy,
}

impl AppState {
    pub fn new(
        reader: Arc<dyn LedgerReader>,
        repository: Arc<dyn LedgerRepository>,
        settings: AggregationSettings,
        batch_policy: BatchPolicy,
    ) -> Self {
        let engine = Arc::new(AggregationEngine::new(reader.clone(), settings));
        Self {
            reader,
            repository,
            engine,
            batch_policy,
        }
    }

    /// State backed by a fresh in-memory ledger.
    pub fn in_memory(settings: AggregationSettings, batch_policy: BatchPolicy) -> Self {
        let ledger = Arc::new(InMemoryLedger::new());
        Self::new(ledger.clone(), ledger, settings, batch_policy)
    }

    // ── users ──

    pub fn create_user_handler(&self) -> CreateUserHandler {
        CreateUserHandler::new(self.repository.clone())
    }

    pub fn rename_user_handler(&self) -> RenameUserHandler {
        RenameUserHandler::new(self.reader.clone(), self.repository.clone())
    }

    pub fn delete_user_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.repository.clone())
    }

    pub fn get_user_handler(&self) -> GetUserHandler {
        GetUserHandler::new(self.reader.clone())
    }

    pub fn user_activity_handler(&self) -> UserActivityHandler {
        UserActivityHandler::new(self.reader.clone())
    }

    // ── categories ──

    pub fn create_category_handler(&self) -> CreateCategoryHandler {
        CreateCategoryHandler::new(self.repository.clone())
    }

    pub fn update_category_handler(&self) -> UpdateCategoryHandler {
        UpdateCategoryHandler::new(self.reader.clone(), self.repository.clone())
    }

    pub fn delete_category_handler(&self) -> DeleteCategoryHandler {
        DeleteCategoryHandler::new(self.repository.clone())
    }

    pub fn get_category_handler(&self) -> GetCategoryHandler {
        GetCategoryHandler::new(self.reader.clone())
    }

    pub fn list_categories_handler(&self) -> ListCategoriesHandler {
        ListCategoriesHandler::new(self.reader.clone())
    }

    // ── points and rewards ──

    pub fn submit_points_handler(&self) -> SubmitPointsHandler {
        SubmitPointsHandler::new(
            self.reader.clone(),
            self.repository.clone(),
            self.batch_policy,
        )
    }

    pub fn cash_out_handler(&self) -> CashOutHandler {
        CashOutHandler::new(self.repository.clone())
    }

    // ── history ──

    pub fn weekly_history_handler(&self) -> GetWeeklyHistoryHandler {
        GetWeeklyHistoryHandler::new(self.engine.clone())
    }

    pub fn daily_breakdown_handler(&self) -> GetDailyBreakdownHandler {
        GetDailyBreakdownHandler::new(self.engine.clone())
    }

    pub fn daily_summary_handler(&self) -> GetDailySummaryHandler {
        GetDailySummaryHandler::new(self.engine.clone())
    }

    pub fn reward_balance_handler(&self) -> GetRewardBalanceHandler {
        GetRewardBalanceHandler::new(self.engine.clone())
    }
}
