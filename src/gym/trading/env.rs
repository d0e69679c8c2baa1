use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    agent::Agent,
    data::{
        domain::{Cash, Symbol},
        indicator::{IndicatorConfig, IndicatorRow},
        view::DayView,
    },
    error::{DataError, EnvError, StockGymResult, SystemError},
    feed::PriceFeed,
    gym::{Env, EnvStatus, Reward, Step, StepOutcome, trading::{action::Action, ledger::Ledger}},
    report::EpisodeReport,
    sim::{cursor::ReverseCursor, data::SimulationData},
};

/// Minimum aligned rows needed to form one (current, next-day) close pair.
const MIN_ALIGNED_ROWS: usize = 2;

/// The trading simulation environment.
///
/// One instance models exactly one episode at a time over one symbol's
/// aligned history. The ledger and cursor are private to the instance and
/// mutated only by the sequential `reset`/`step` caller; the backing
/// [`SimulationData`] is shared and read-only.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Shared simulation data backing the environment.
    data: Arc<SimulationData>,

    /// Reverse-walk position within the aligned history.
    cursor: ReverseCursor,

    /// Portfolio state for the current episode.
    ledger: Ledger,

    /// Current status of the environment (ready, running, done).
    status: EnvStatus,
}

impl Environment {
    /// Wraps an aligned history. Fails fast when there are too few rows to
    /// step at least once.
    pub fn new(data: Arc<SimulationData>) -> StockGymResult<Self> {
        if data.len() < MIN_ALIGNED_ROWS {
            return Err(DataError::InsufficientHistory {
                rows: data.len(),
                min: MIN_ALIGNED_ROWS,
            }
            .into());
        }

        Ok(Self {
            cursor: ReverseCursor::new(data.len()),
            ledger: Ledger::default(),
            status: EnvStatus::Ready,
            data,
        })
    }

    /// One-stop factory: fetch the symbol's history through the feed, build
    /// the aligned indicator table, and wrap it in an environment.
    ///
    /// This is the single blocking setup call of the crate; any feed or
    /// alignment failure aborts construction and no episode ever starts.
    #[tracing::instrument(skip(feed, cfg), fields(symbol = %symbol))]
    pub fn make(
        feed: &dyn PriceFeed,
        symbol: &Symbol,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cfg: &IndicatorConfig,
    ) -> StockGymResult<Self> {
        let records = feed.fetch(symbol, start, end)?;
        let data = SimulationData::build(records, cfg);
        Self::new(Arc::new(data))
    }

    pub fn status(&self) -> EnvStatus {
        self.status
    }

    /// Read access to the portfolio, mainly for reporting and tests.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn data(&self) -> &SimulationData {
        &self.data
    }

    /// Runs one full episode with the given agent and capital.
    pub fn evaluate_agent<T: Agent>(
        &mut self,
        agent: &mut T,
        total_capital: Cash,
    ) -> StockGymResult<EpisodeReport> {
        let mut observation = self.reset(total_capital)?;
        let mut total_reward = Reward(0.0);
        let mut steps = 0_usize;

        loop {
            let action = agent.act(&observation)?;
            let step = self.step(action)?;

            total_reward += step.reward;
            steps += 1;

            match step.observation {
                Some(next) => observation = next,
                None => break,
            }
        }

        agent.reset();

        Ok(EpisodeReport {
            steps,
            total_reward,
            final_cash: self.ledger.cash(),
            final_quantity: self.ledger.quantity(),
        })
    }

    fn check_step_status(&self) -> StockGymResult<()> {
        match self.status {
            EnvStatus::Running => Ok(()),
            EnvStatus::Ready => Err(EnvError::InvalidState(
                "Environment is not started. Call `reset()` before stepping.".to_string(),
            )
            .into()),
            EnvStatus::Done => Err(EnvError::InvalidState(
                "Episode is done. Call `reset()` before stepping.".to_string(),
            )
            .into()),
        }
    }

    fn observation_at(&self, index: usize) -> StockGymResult<IndicatorRow> {
        self.data
            .indicators()
            .get(index)
            .copied()
            .ok_or_else(|| SystemError::IndexOutOfBounds(format!("indicator row {index}")).into())
    }
}

impl Env for Environment {
    #[tracing::instrument(skip(self))]
    fn reset(&mut self, total_capital: Cash) -> StockGymResult<IndicatorRow> {
        if !(total_capital.0 > 0.0) {
            return Err(EnvError::InvalidCapital(total_capital.0).into());
        }

        self.cursor.rewind();
        self.ledger.reset(total_capital);
        self.status = EnvStatus::Running;

        tracing::info!(
            rows = self.data.len(),
            cursor = self.cursor.current(),
            capital = total_capital.0,
            "episode starting"
        );

        self.observation_at(self.cursor.current())
    }

    fn step(&mut self, action: Action) -> StockGymResult<Step> {
        // 1. Precondition gate. Every fallible check happens before the first
        //    mutation, so a rejected step leaves no intermediate state.
        self.check_step_status()?;

        // 2. Refresh the day snapshot at the current cursor.
        let cursor = self.cursor.current();
        let view = DayView::at(self.data.records(), cursor)
            .ok_or_else(|| SystemError::IndexOutOfBounds(format!("record {cursor}")))?;

        // 3./4. Apply the portfolio mutation and scale the reward by the
        // position size. "Next day" is one session closer to the present.
        let base = view.next_close - view.close;
        let reward = match action {
            Action::Buy => {
                let quantity = self.ledger.buy(view.close)?;
                Reward(base.0 * quantity.0)
            }
            Action::Hold => Reward(base.0 * self.ledger.quantity().0),
            Action::Sell => {
                // Sign flips: the position was held going into this day and
                // is being closed, scaled by the pre-sale quantity.
                let sold = self.ledger.sell();
                -Reward(base.0 * sold.0)
            }
        };

        // 5. Walk one session toward the present.
        self.cursor.step();

        // 6. Terminal exactly when the newest session is reached.
        let (outcome, observation) = if self.cursor.is_exhausted() {
            self.status = EnvStatus::Done;
            tracing::info!(reward = reward.0, "episode done");
            (StepOutcome::Done, None)
        } else {
            let next = self.observation_at(self.cursor.current())?;
            (StepOutcome::InProgress, Some(next))
        };

        tracing::debug!(
            %action,
            cursor = self.cursor.current(),
            reward = reward.0,
            quantity = self.ledger.quantity().0,
            cash = self.ledger.cash().0,
            "step applied"
        );

        Ok(Step {
            reward,
            observation,
            outcome,
        })
    }
}

#[cfg(test)]
mod test {
    use chrono::{DateTime, Duration, Utc};

    use super::*;
    use crate::data::{
        domain::{Price, Quantity},
        indicator::{Band, MacdValue},
        record::DailyRecord,
    };

    fn flat_row() -> IndicatorRow {
        IndicatorRow {
            band: Band {
                lower: Price(0.0),
                mid: Price(0.0),
                upper: Price(0.0),
            },
            rsi: 50.0,
            macd: MacdValue {
                line: 0.0,
                signal: 0.0,
                histogram: 0.0,
            },
        }
    }

    /// Newest-first aligned history with the given closes and placeholder
    /// indicator rows.
    fn history(closes: &[f64]) -> Arc<SimulationData> {
        let newest = DateTime::<Utc>::UNIX_EPOCH + Duration::days(20_000);
        let records = closes
            .iter()
            .enumerate()
            .map(|(age, &close)| DailyRecord {
                timestamp: newest - Duration::days(age as i64),
                open: Price(close),
                high: Price(close),
                low: Price(close),
                close: Price(close),
                volume: Quantity(1.0),
            })
            .collect();
        let rows = vec![flat_row(); closes.len()];

        Arc::new(SimulationData::from_aligned(records, rows).unwrap())
    }

    #[test]
    fn test_new_rejects_single_row_history() {
        let err = Environment::new(history(&[10.0])).unwrap_err();
        assert!(err.to_string().contains("too short"), "{err}");
    }

    #[test]
    fn test_step_before_reset_is_rejected() {
        let mut env = Environment::new(history(&[10.0, 8.0])).unwrap();
        assert!(env.step(Action::Hold).is_err());
        assert!(env.status().is_ready(), "failed step must not mutate status");
    }

    #[test]
    fn test_reset_requires_positive_capital() {
        let mut env = Environment::new(history(&[10.0, 8.0])).unwrap();
        assert!(env.reset(Cash(0.0)).is_err());
        assert!(env.reset(Cash(-10.0)).is_err());
        assert!(env.reset(Cash(f64::NAN)).is_err());
    }

    #[test]
    fn test_corrupt_close_fails_buy_without_partial_state() {
        let mut env = Environment::new(history(&[10.0, 0.0])).unwrap();
        env.reset(Cash(100.0)).unwrap();

        let err = env.step(Action::Buy).unwrap_err();
        assert!(err.to_string().contains("Corrupt"), "{err}");

        // No partial mutation: same cursor, still running, holding allowed.
        assert!(env.status().is_running());
        assert_eq!(env.ledger().cash(), Cash(100.0));
        let step = env.step(Action::Hold).unwrap();
        assert_eq!(step.reward, Reward(0.0));
    }

    #[test]
    fn test_reset_restarts_a_done_environment() {
        let mut env = Environment::new(history(&[10.0, 8.0])).unwrap();
        env.reset(Cash(100.0)).unwrap();
        let step = env.step(Action::Hold).unwrap();
        assert!(step.outcome.is_done());

        env.reset(Cash(100.0)).unwrap();
        assert!(env.status().is_running());
        assert!(!env.step(Action::Hold).unwrap().reward.0.is_nan());
    }
}
