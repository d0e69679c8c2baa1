use serde::{Deserialize, Serialize};

use crate::data::domain::Price;

// ================================================================================================
// Window Configuration
// ================================================================================================

/// Lookback window for the Bollinger band moving average.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BollingerWindow(pub u16);

/// Lookback window for the relative-strength index.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RsiWindow(pub u16);

/// Fast/slow/signal EMA spans for the MACD trend oscillator.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MacdWindows {
    pub fast: u16,
    pub slow: u16,
    pub signal: u16,
}

/// Which indicators make up the aligned feature table, and their windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub bollinger: BollingerWindow,
    /// Band half-width as a multiple of the rolling standard deviation.
    pub band_width: f64,
    pub rsi: RsiWindow,
    pub macd: MacdWindows,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            bollinger: BollingerWindow(20),
            band_width: 2.0,
            rsi: RsiWindow(14),
            macd: MacdWindows {
                fast: 12,
                slow: 26,
                signal: 9,
            },
        }
    }
}

// ================================================================================================
// Per-Day Feature Values
// ================================================================================================

/// A Bollinger band snapshot around the rolling mean.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Band {
    pub lower: Price,
    pub mid: Price,
    pub upper: Price,
}

/// A MACD snapshot: fast-minus-slow line, its signal EMA, and their spread.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct MacdValue {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Aligned per-day feature vector, keyed by the same index as `DailyRecord`.
///
/// Rows only exist for days where every indicator is warm, so none of the
/// fields is optional.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub band: Band,
    pub rsi: f64,
    pub macd: MacdValue,
}
