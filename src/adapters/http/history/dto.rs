//! HTTP DTOs for history endpoints.
//!
//! History is read-only and the domain reports are already shaped for
//! serialization, so they are re-exported directly.

pub use crate::domain::history::{CategoryBreakdownReport, WeeklyHistory};

use serde::Deserialize;

use crate::domain::history::WeekSelector;

/// Query parameters for the weekly history endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    /// Truthy value selects the previous week.
    pub prior: Option<String>,
}

impl HistoryParams {
    pub fn week(&self) -> WeekSelector {
        WeekSelector::from_flag(self.prior.as_deref())
    }
}
