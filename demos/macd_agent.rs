//! Runs the MACD crossover agent and a noise baseline over a synthetic
//! daily series, printing one episode report each.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example macd_agent
//! ```

use anyhow::{Context, Result};
use chrono::{Duration, TimeZone, Utc};
use stockgym::{feed::memory::synthetic_walk, prelude::*};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .context("invalid start date")?;
    let end = start + Duration::days(365);

    let symbol: Symbol = "SBIN".parse()?;
    let feed = InMemoryFeed::new(symbol.clone(), synthetic_walk(start, 365, 42));

    let mut env = Environment::make(&feed, &symbol, start, end, &IndicatorConfig::default())
        .context("failed to build trading environment")?;
    println!("aligned history: {} sessions", env.data().len());

    let capital = Cash(100_000.0);

    let mut macd = MacdCross::new();
    let report = env.evaluate_agent(&mut macd, capital)?;
    println!("macd crossover  -> {report}");

    let mut noise = NoiseTrader::seeded(7);
    let report = env.evaluate_agent(&mut noise, capital)?;
    println!("noise baseline  -> {report}");

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();
}
