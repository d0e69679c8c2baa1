use chrono::{DateTime, Utc};

use crate::{data::domain::Symbol, data::record::DailyRecord, error::StockGymResult};

pub mod memory;

/// The market-data collaborator boundary.
///
/// A feed hands back one symbol's daily history in its provider-native order;
/// callers must not rely on any particular ordering. Normalization to the
/// simulation's indexing happens in [`crate::sim::data::SimulationData`].
///
/// Fetching is the one potentially slow operation in the crate and happens
/// exactly once, before an episode starts. Failures here abort environment
/// construction; there is no retry policy.
pub trait PriceFeed {
    fn fetch(
        &self,
        symbol: &Symbol,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StockGymResult<Vec<DailyRecord>>;
}
