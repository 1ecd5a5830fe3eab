//! GetRewardBalanceHandler - Query handler for a user's cash-out figures.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::history::RewardBalance;
use crate::domain::ledger::LedgerError;

use super::AggregationEngine;

/// Query for one user's reward balance.
#[derive(Debug, Clone, Copy)]
pub struct GetRewardBalanceQuery {
    pub user_id: UserId,
}

pub struct GetRewardBalanceHandler {
    engine: Arc<AggregationEngine>,
}

impl GetRewardBalanceHandler {
    pub fn new(engine: Arc<AggregationEngine>) -> Self {
        Self { engine }
    }

    pub async fn handle(&self, query: GetRewardBalanceQuery) -> Result<RewardBalance, LedgerError> {
        self.engine.reward_balance(&query.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLedger;
    use crate::application::handlers::history::AggregationSettings;
    use crate::domain::foundation::{RewardId, Timestamp};
    use crate::domain::ledger::{Reward, User};
    use crate::ports::LedgerRepository;

    #[tokio::test]
    async fn overdrawn_balance_goes_negative() {
        let ledger = Arc::new(InMemoryLedger::new());
        let user = User::new(UserId::new(), "Ada", Timestamp::now()).unwrap();
        ledger.save_user(&user).await.unwrap();
        ledger
            .save_reward(&Reward::new(RewardId::new(), *user.id(), 12, Timestamp::now()))
            .await
            .unwrap();

        let handler = GetRewardBalanceHandler::new(Arc::new(AggregationEngine::new(
            ledger,
            AggregationSettings::default(),
        )));
        let balance = handler
            .handle(GetRewardBalanceQuery { user_id: *user.id() })
            .await
            .unwrap();

        assert_eq!(balance.cashed_out, 12);
        assert_eq!(balance.remaining, -12);
    }
}
