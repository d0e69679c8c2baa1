use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    agent::Agent, data::indicator::IndicatorRow, error::StockGymResult,
    gym::trading::action::Action,
};

/// Uniform random policy, useful as a reward-signal sanity baseline.
///
/// Seeded explicitly so evaluation runs are reproducible.
#[derive(Debug, Clone)]
pub struct NoiseTrader {
    rng: StdRng,
    seed: u64,
}

impl NoiseTrader {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Agent for NoiseTrader {
    fn act(&mut self, _observation: &IndicatorRow) -> StockGymResult<Action> {
        Action::try_from(self.rng.random_range(-1_i8..=1))
    }

    fn reset(&mut self) {
        // Reseed so every episode replays the same action sequence.
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}
