use crate::{data::indicator::IndicatorRow, error::StockGymResult, gym::trading::action::Action};

pub mod macd_cross;
pub mod noise;

/// A decision policy driven by the environment's observations.
///
/// Agents are plain sequential state machines: `act` may mutate internal
/// state (e.g. remember the previous indicator value), and `reset` clears it
/// between episodes.
pub trait Agent {
    /// Chooses the action for the session described by `observation`.
    fn act(&mut self, observation: &IndicatorRow) -> StockGymResult<Action>;

    /// Clears per-episode state. Called by the evaluation driver after the
    /// episode terminates.
    fn reset(&mut self);
}
