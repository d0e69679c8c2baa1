use crate::{
    agent::Agent,
    data::indicator::IndicatorRow,
    error::{AgentError, StockGymResult},
    gym::trading::action::Action,
};

/// Baseline trend follower on the MACD histogram.
///
/// Buys when the histogram crosses from non-positive to positive (the MACD
/// line overtakes its signal), sells on the opposite cross, holds otherwise.
/// Tracks whether it is invested so it never doubles into a position.
#[derive(Debug, Clone, Default)]
pub struct MacdCross {
    prev_histogram: Option<f64>,
    invested: bool,
}

impl MacdCross {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Agent for MacdCross {
    fn act(&mut self, observation: &IndicatorRow) -> StockGymResult<Action> {
        let histogram = observation.macd.histogram;
        if !histogram.is_finite() {
            return Err(
                AgentError::InvalidInput(format!("non-finite MACD histogram: {histogram}")).into(),
            );
        }
        let prev = self.prev_histogram.replace(histogram);

        let action = match prev {
            Some(prev) if prev <= 0.0 && histogram > 0.0 && !self.invested => Action::Buy,
            Some(prev) if prev >= 0.0 && histogram < 0.0 && self.invested => Action::Sell,
            // First observation: no cross to detect yet.
            _ => Action::Hold,
        };

        match action {
            Action::Buy => self.invested = true,
            Action::Sell => self.invested = false,
            Action::Hold => {}
        }

        Ok(action)
    }

    fn reset(&mut self) {
        self.prev_histogram = None;
        self.invested = false;
    }
}
