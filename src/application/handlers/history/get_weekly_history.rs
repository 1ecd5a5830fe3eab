//! GetWeeklyHistoryHandler - Query handler for the weekly history page.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::Timestamp;
use crate::domain::history::{TimeWindow, WeekSelector, WeeklyHistory};
use crate::domain::ledger::LedgerError;

use super::AggregationEngine;

/// Query for one week of history.
#[derive(Debug, Clone, Copy)]
pub struct GetWeeklyHistoryQuery {
    pub now: Timestamp,
    pub week: WeekSelector,
}

/// Handler for the weekly history page.
///
/// Breakdown and totals share the same seven-day window so the two
/// tables always agree.
pub struct GetWeeklyHistoryHandler {
    engine: Arc<AggregationEngine>,
}

impl GetWeeklyHistoryHandler {
    pub fn new(engine: Arc<AggregationEngine>) -> Self {
        Self { engine }
    }

    pub async fn handle(&self, query: GetWeeklyHistoryQuery) -> Result<WeeklyHistory, LedgerError> {
        let week_start = self.engine.week_start(query.now, query.week);
        debug!(week = ?query.week, week_start = %week_start.as_datetime(), "loading weekly history");

        let breakdown = self
            .engine
            .category_breakdown(TimeWindow::week_from(week_start))
            .await?;
        let totals = self.engine.weekly_totals(week_start).await?;

        Ok(WeeklyHistory { breakdown, totals })
    }
}
