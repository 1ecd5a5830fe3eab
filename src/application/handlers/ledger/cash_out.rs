//! CashOutHandler - Command handler for recording a reward.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{RewardId, Timestamp, UserId};
use crate::domain::ledger::{LedgerError, Reward};
use crate::ports::LedgerRepository;

/// Command to redeem points.
#[derive(Debug, Clone)]
pub struct CashOutCommand {
    pub user_id: UserId,
    pub value: i32,
    pub cashed_out_at: Timestamp,
}

/// Handler for cash-outs.
///
/// The balance is not checked; a user may redeem more than they have.
/// A missing user surfaces as the store's reference failure.
pub struct CashOutHandler {
    repository: Arc<dyn LedgerRepository>,
}

impl CashOutHandler {
    pub fn new(repository: Arc<dyn LedgerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CashOutCommand) -> Result<Reward, LedgerError> {
        let reward = Reward::new(RewardId::new(), cmd.user_id, cmd.value, cmd.cashed_out_at);
        self.repository.save_reward(&reward).await?;

        info!(user_id = %cmd.user_id, value = cmd.value, "reward cashed out");
        Ok(reward)
    }
}
