use serde::{Deserialize, Serialize};

use crate::{
    data::{domain::Cash, indicator::IndicatorRow},
    error::StockGymResult,
    gym::trading::action::Action,
    impl_add_sub_primitive, impl_from_primitive, impl_neg_primitive,
};

pub mod trading;

/// Per-step reward signal.
///
/// The reward approximates the capital P&L attributable to the position, not
/// merely the price direction: the raw next-day close delta is scaled by the
/// quantity held at the time of the action, so agents are rewarded in
/// proportion to their exposure.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Reward(pub f64);
impl_from_primitive!(Reward, f64);
impl_add_sub_primitive!(Reward, f64);
impl_neg_primitive!(Reward, f64);

/// Lifecycle status of the trading environment.
///
/// The environment is a finite state machine with these transitions; anything
/// else is a precondition violation and returns an error.
///
/// ```md
/// Current State                   | Action  | Next State | Notes
/// --------------------------------|---------|------------|-----------------------------
/// `Running` (cursor reaches 0)    | step()  | Done       | Episode terminates
/// `Running`                       | step()  | Running    | Continue within episode
/// `Ready` / `Running` / `Done`    | reset() | Running    | (Re)start an episode
/// `Ready` / `Done`                | step()  | -          | Error, nothing mutated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvStatus {
    /// Initial state. Waiting for `reset()`.
    Ready,

    /// An episode is active and `step()` calls are accepted.
    Running,

    /// The cursor reached the most recent session. Absorbing until `reset()`.
    Done,
}

impl EnvStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Whether a step left the episode in progress or terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    InProgress,
    Done,
}

impl StepOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Everything a caller gets back from one `step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub reward: Reward,
    /// The indicator row at the new cursor, or `None` at the terminal state.
    pub observation: Option<IndicatorRow>,
    pub outcome: StepOutcome,
}

/// The Gym-style control surface exposed to a training loop.
pub trait Env {
    /// Starts an episode with the given total capital and returns the initial
    /// observation at the oldest usable session.
    fn reset(&mut self, total_capital: Cash) -> StockGymResult<IndicatorRow>;

    /// Applies one action, advances one session toward the present, and
    /// reports the scaled reward. Calling this on a `Ready` or `Done`
    /// environment is rejected without mutating any state.
    fn step(&mut self, action: Action) -> StockGymResult<Step>;
}
