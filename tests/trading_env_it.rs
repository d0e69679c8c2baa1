//! End-to-end scenarios for the trading environment: the synthetic
//! closing-price walkthrough, termination counts, and capital conservation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use stockgym::prelude::*;

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

/// Newest-first aligned history (index 0 = most recent session) with
/// placeholder indicator rows.
fn history(closes: &[f64]) -> Arc<SimulationData> {
    let newest = DateTime::<Utc>::UNIX_EPOCH + Duration::days(20_000);
    let records = closes
        .iter()
        .enumerate()
        .map(|(age, &close)| DailyRecord {
            timestamp: newest - Duration::days(age as i64),
            open: Price(close),
            high: Price(close + 0.5),
            low: Price(close - 0.5),
            close: Price(close),
            volume: Quantity(10_000.0),
        })
        .collect();
    let rows = vec![flat_row(); closes.len()];

    Arc::new(SimulationData::from_aligned(records, rows).unwrap())
}

/// The 5-row series from the walkthrough: index 0 = newest.
fn walkthrough_env() -> Environment {
    Environment::new(history(&[10.0, 11.0, 9.0, 12.0, 8.0])).unwrap()
}

#[test]
fn test_scenario_walkthrough_buy_hold_sell() {
    let mut env = walkthrough_env();
    env.reset(Cash(100.0)).unwrap();

    // Scenario A: BUY at the oldest session (close 8).
    // NAV = 8, qty = floor(100 / 8) = 12, invested 96, cash 4.
    // Reward = (next close - close) * qty = (12 - 8) * 12.
    let step = env.step(Action::Buy).unwrap();
    assert_eq!(step.reward, Reward(48.0));
    assert_eq!(env.ledger().quantity(), Quantity(12.0));
    assert_eq!(env.ledger().capital_invested(), Cash(96.0));
    assert_eq!(env.ledger().cash(), Cash(4.0));

    // Scenario B: HOLD at close 12. Reward = (9 - 12) * 12.
    let step = env.step(Action::Hold).unwrap();
    assert_eq!(step.reward, Reward(-36.0));
    assert_eq!(env.ledger().quantity(), Quantity(12.0));

    // Scenario C: SELL at close 9. Sign flips against the pre-sale quantity:
    // reward = -((11 - 9) * 12), then the position is zeroed.
    let step = env.step(Action::Sell).unwrap();
    assert_eq!(step.reward, Reward(-24.0));
    assert_eq!(env.ledger().quantity(), Quantity(0.0));
    assert_eq!(env.ledger().capital_invested(), Cash(0.0));
    assert!(!step.outcome.is_done(), "one session still remains");

    // Final HOLD with an empty position: reward degenerates to 0.
    let step = env.step(Action::Hold).unwrap();
    assert_eq!(step.reward, Reward(0.0));
    assert!(step.outcome.is_done());
    assert!(step.observation.is_none(), "terminal state has no observation");
}

#[test]
fn test_termination_takes_exactly_n_minus_one_steps() {
    let mut env = Environment::new(history(&[10.0, 11.0, 9.0, 12.0, 8.0])).unwrap();
    env.reset(Cash(100.0)).unwrap();

    for i in 0..3 {
        let step = env.step(Action::Hold).unwrap();
        assert!(!step.outcome.is_done(), "step {i} must not be terminal");
        assert!(step.observation.is_some());
    }

    let last = env.step(Action::Hold).unwrap();
    assert!(last.outcome.is_done(), "the 4th step terminates 5 rows");
}

#[test]
fn test_two_row_history_allows_exactly_one_step() {
    let mut env = Environment::new(history(&[10.0, 8.0])).unwrap();
    env.reset(Cash(100.0)).unwrap();

    let step = env.step(Action::Buy).unwrap();
    assert!(step.outcome.is_done());

    let err = env.step(Action::Hold).unwrap_err();
    assert!(
        matches!(err, StockGymError::Env(EnvError::InvalidState(_))),
        "stepping after done is a precondition violation"
    );
}

#[test]
fn test_hold_with_empty_position_is_always_zero_reward() {
    let mut env = walkthrough_env();
    env.reset(Cash(100.0)).unwrap();

    for _ in 0..4 {
        let step = env.step(Action::Hold).unwrap();
        assert_eq!(step.reward, Reward(0.0));
    }
}

#[test]
fn test_capital_is_never_created() {
    let mut env = walkthrough_env();
    env.reset(Cash(100.0)).unwrap();

    for action in [Action::Buy, Action::Hold, Action::Sell, Action::Buy] {
        env.step(action).unwrap();
        let total = env.ledger().cash() + env.ledger().capital_invested();
        assert!(
            total.0 <= 100.0 + f64::EPSILON,
            "cash + invested exceeded the initial capital: {total:?}"
        );
    }
}

#[test]
fn test_buy_is_capped_at_available_cash() {
    // Requesting more capital than a unit costs: the ledger deploys only what
    // it has and keeps the flooring residual as idle cash, never negative.
    let mut env = Environment::new(history(&[10.0, 11.0, 7.0])).unwrap();
    env.reset(Cash(25.0)).unwrap();

    env.step(Action::Buy).unwrap();
    assert_eq!(env.ledger().quantity(), Quantity(3.0), "floor(25 / 7)");
    assert_eq!(env.ledger().capital_invested(), Cash(21.0));
    assert_eq!(env.ledger().cash(), Cash(4.0));

    // Buying again with only residual cash cannot afford a unit.
    env.step(Action::Buy).unwrap();
    assert_eq!(env.ledger().quantity(), Quantity(3.0));
    assert!(env.ledger().cash().0 >= 0.0);
}

#[test]
fn test_sell_with_no_position_is_benign() {
    let mut env = walkthrough_env();
    env.reset(Cash(100.0)).unwrap();

    let step = env.step(Action::Sell).unwrap();
    assert_eq!(step.reward, Reward(0.0), "zero quantity, zero reward");
    assert_eq!(env.ledger().cash(), Cash(100.0));
}

#[test]
fn test_wire_codes_drive_the_env() {
    let mut env = walkthrough_env();
    env.reset(Cash(100.0)).unwrap();

    let buy = Action::try_from(1).unwrap();
    let step = env.step(buy).unwrap();
    assert_eq!(step.reward, Reward(48.0));

    assert!(Action::try_from(2).is_err());
    assert!(Action::try_from(-2).is_err());
}

#[test]
fn test_full_pipeline_from_feed_to_episode() {
    use chrono::TimeZone;

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let symbol: Symbol = "SBIN".parse().unwrap();
    let feed = InMemoryFeed::new(
        symbol.clone(),
        stockgym::feed::memory::synthetic_walk(start, 120, 11),
    );

    let mut env = Environment::make(
        &feed,
        &symbol,
        start,
        start + Duration::days(120),
        &IndicatorConfig::default(),
    )
    .unwrap();

    // 120 raw sessions minus the 33-session warm-up of the default config.
    assert_eq!(env.data().len(), 87);

    let mut agent = MacdCross::new();
    let report = env.evaluate_agent(&mut agent, Cash(10_000.0)).unwrap();
    assert_eq!(report.steps, env.data().len() - 1);
    let allocated = (report.final_cash + env.ledger().capital_invested()).0;
    assert!(
        (allocated - 10_000.0).abs() < 1e-6,
        "allocation account is conserved end to end, got {allocated}"
    );
}

#[test]
fn test_noise_trader_episode_is_reproducible() {
    let mut env = walkthrough_env();

    let mut agent = NoiseTrader::seeded(5);
    let first = env.evaluate_agent(&mut agent, Cash(100.0)).unwrap();
    let second = env.evaluate_agent(&mut agent, Cash(100.0)).unwrap();

    assert_eq!(first, second);
}
