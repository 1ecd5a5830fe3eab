//! GetDailySummaryHandler - Query handler for the live users dashboard.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::history::DailySummary;
use crate::domain::ledger::LedgerError;

use super::AggregationEngine;

/// Query for today's per-user figures.
#[derive(Debug, Clone, Copy)]
pub struct GetDailySummaryQuery {
    pub now: Timestamp,
}

/// Handler for the users dashboard.
///
/// Clients poll this; `new` covers only the configured lookback so a
/// freshly logged point shows up once and then fades.
pub struct GetDailySummaryHandler {
    engine: Arc<AggregationEngine>,
}

impl GetDailySummaryHandler {
    pub fn new(engine: Arc<AggregationEngine>) -> Self {
        Self { engine }
    }

    pub async fn handle(&self, query: GetDailySummaryQuery) -> Result<DailySummary, LedgerError> {
        self.engine.daily_summary(query.now).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLedger;
    use crate::application::handlers::history::AggregationSettings;
    use crate::domain::foundation::UserId;
    use crate::domain::ledger::User;
    use crate::ports::LedgerRepository;

    #[tokio::test]
    async fn every_user_is_listed_with_zeros() {
        let ledger = Arc::new(InMemoryLedger::new());
        let now = Timestamp::now();
        for name in ["Ada", "Grace"] {
            ledger
                .save_user(&User::new(UserId::new(), name, now).unwrap())
                .await
                .unwrap();
        }
        let handler = GetDailySummaryHandler::new(Arc::new(AggregationEngine::new(
            ledger,
            AggregationSettings::default(),
        )));

        let summary = handler.handle(GetDailySummaryQuery { now }).await.unwrap();
        assert_eq!(summary.users.len(), 2);
        assert!(summary
            .users
            .iter()
            .all(|u| u.neg == 0 && u.pos == 0 && u.new == 0));
    }
}
