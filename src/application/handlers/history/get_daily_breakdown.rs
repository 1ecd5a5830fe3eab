//! GetDailyBreakdownHandler - Category breakdown since local midnight.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::history::{CategoryBreakdownReport, TimeWindow};
use crate::domain::ledger::LedgerError;

use super::AggregationEngine;

/// Query for today's category breakdown.
#[derive(Debug, Clone, Copy)]
pub struct GetDailyBreakdownQuery {
    pub now: Timestamp,
}

pub struct GetDailyBreakdownHandler {
    engine: Arc<AggregationEngine>,
}

impl GetDailyBreakdownHandler {
    pub fn new(engine: Arc<AggregationEngine>) -> Self {
        Self { engine }
    }

    pub async fn handle(
        &self,
        query: GetDailyBreakdownQuery,
    ) -> Result<CategoryBreakdownReport, LedgerError> {
        let day_start = self.engine.settings().calendar.start_of_day(query.now);
        self.engine
            .category_breakdown(TimeWindow::since(day_start))
            .await
    }
}
