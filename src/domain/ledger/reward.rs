//! Reward entity - a cash-out against accumulated points.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RewardId, Timestamp, UserId};

/// One redemption event. Its value is subtracted from the user's remaining
/// balance. No check against the balance is made when it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    id: RewardId,
    user_id: UserId,
    value: i32,
    created_at: Timestamp,
}

impl Reward {
    pub fn new(id: RewardId, user_id: UserId, value: i32, created_at: Timestamp) -> Self {
        Self {
            id,
            user_id,
            value,
            created_at,
        }
    }

    pub fn id(&self) -> &RewardId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
