//! Signed point breakdowns.

use serde::{Deserialize, Serialize};

/// Which side of zero a point value falls on.
///
/// Zero belongs to the non-negative side; only `value < 0` is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSign {
    Any,
    Negative,
    NonNegative,
}

impl ValueSign {
    pub fn matches(&self, value: i32) -> bool {
        match self {
            ValueSign::Any => true,
            ValueSign::Negative => value < 0,
            ValueSign::NonNegative => value >= 0,
        }
    }
}

/// `{neg, pos}` summary of the points in a window.
///
/// `neg` is the magnitude of the negative sum, so both fields are never
/// below zero and `pos - neg` is the signed total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBreakdown {
    pub neg: i64,
    pub pos: i64,
}

impl SignedBreakdown {
    /// Builds a breakdown from the two signed sums a store returns.
    pub fn from_sums(negative_sum: i64, non_negative_sum: i64) -> Self {
        Self {
            neg: negative_sum.abs(),
            pos: non_negative_sum,
        }
    }
}
