use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    data::domain::{Cash, Quantity},
    gym::Reward,
};

/// Summary of one completed episode, as returned by
/// [`crate::Environment::evaluate_agent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    /// Number of `step` calls it took to reach the terminal state. Always
    /// `aligned_rows - 1`.
    pub steps: usize,
    /// Sum of all per-step rewards, i.e. the exposure-weighted P&L signal.
    pub total_reward: Reward,
    pub final_cash: Cash,
    pub final_quantity: Quantity,
}

impl fmt::Display for EpisodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "steps: {}, total reward: {:.2}, final cash: {:.2}, final holding: {} units",
            self.steps, self.total_reward.0, self.final_cash.0, self.final_quantity.0
        )
    }
}
