use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    data::{
        domain::{Price, Quantity, Symbol},
        record::DailyRecord,
    },
    error::{FeedError, StockGymResult},
    feed::PriceFeed,
};

/// A [`PriceFeed`] backed by a pre-loaded record vector.
///
/// This is the reference producer for tests and demos; a remote provider
/// implementing the same trait slots in without touching the environment.
#[derive(Debug, Clone)]
pub struct InMemoryFeed {
    symbol: Symbol,
    records: Vec<DailyRecord>,
}

impl InMemoryFeed {
    pub fn new(symbol: Symbol, records: Vec<DailyRecord>) -> Self {
        Self { symbol, records }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }
}

impl PriceFeed for InMemoryFeed {
    #[tracing::instrument(skip(self), fields(symbol = %symbol))]
    fn fetch(
        &self,
        symbol: &Symbol,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StockGymResult<Vec<DailyRecord>> {
        if start > end {
            return Err(FeedError::InvalidRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            }
            .into());
        }
        if symbol != &self.symbol {
            return Err(FeedError::UnknownSymbol(symbol.to_string()).into());
        }

        let hits: Vec<DailyRecord> = self
            .records
            .iter()
            .filter(|r| start <= r.timestamp && r.timestamp <= end)
            .copied()
            .collect();

        if hits.is_empty() {
            return Err(FeedError::EmptyFetch {
                symbol: symbol.to_string(),
            }
            .into());
        }

        tracing::debug!(records = hits.len(), "fetch served from memory");
        Ok(hits)
    }
}

/// Deterministic synthetic daily series: a seeded random walk on the close,
/// with open/high/low derived around it. Ordered oldest-first, one row per
/// calendar day starting at `start`.
pub fn synthetic_walk(start: DateTime<Utc>, days: usize, seed: u64) -> Vec<DailyRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut close = 100.0_f64;

    (0..days)
        .map(|day| {
            let open = close;
            close = (close + rng.random_range(-2.0..2.0)).max(1.0);
            let high = open.max(close) + rng.random_range(0.0..1.0);
            let low = (open.min(close) - rng.random_range(0.0..1.0)).max(0.5);

            DailyRecord {
                timestamp: start + Duration::days(day as i64),
                open: Price(open),
                high: Price(high),
                low: Price(low),
                close: Price(close),
                volume: Quantity(rng.random_range(10_000.0..1_000_000.0)),
            }
        })
        .collect()
}
