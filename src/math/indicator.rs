use std::{collections::VecDeque, fmt::Debug};

use serde::{Deserialize, Serialize};

use crate::data::{
    domain::Price,
    indicator::{Band, MacdValue, MacdWindows},
};

/// A trait for incremental indicators fed one closing price at a time.
///
/// `update` returns `Some(value)` once the indicator is warm (enough data
/// seen), otherwise `None`. Alignment trimming keys off exactly this: a day
/// enters the feature table only when every indicator reports `Some`.
pub trait StreamingIndicator {
    type Output: Copy + Debug;

    fn update(&mut self, value: f64) -> Option<Self::Output>;

    /// Clears all history, e.g. before replaying a new symbol.
    fn reset(&mut self);
}

// ================================================================================================
// SHARED: Exponential Weighted Mean (Base Logic)
// ================================================================================================

/// Internal helper for EMA-like smoothing (standard EMA and Wilder's).
/// Recursive form: `y_t = alpha * x_t + (1 - alpha) * y_{t-1}`, seeded with
/// the first observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Ewm {
    alpha: f64,
    mean: f64,
    initialized: bool,
    window: usize,
    count: usize,
}

impl Ewm {
    fn new(alpha: f64, window: usize) -> Self {
        Self {
            alpha,
            mean: 0.0,
            initialized: false,
            window,
            count: 0,
        }
    }

    fn update(&mut self, value: f64) -> Option<f64> {
        if self.initialized {
            self.mean = self.alpha * value + (1.0 - self.alpha) * self.mean;
            self.count += 1;
        } else {
            self.mean = value;
            self.initialized = true;
            self.count = 1;
        }

        (self.count >= self.window).then_some(self.mean)
    }

    fn reset(&mut self) {
        self.mean = 0.0;
        self.initialized = false;
        self.count = 0;
    }
}

// ================================================================================================
// SMA: Simple Moving Average
// ================================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sma {
    window: usize,
    buffer: VecDeque<f64>,
    sum: f64,
}

impl Sma {
    pub fn new(window: u16) -> Self {
        let window = window as usize;
        Self {
            window,
            buffer: VecDeque::with_capacity(window),
            sum: 0.0,
        }
    }
}

impl StreamingIndicator for Sma {
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        self.buffer.push_back(value);
        self.sum += value;

        if self.buffer.len() > self.window
            && let Some(evicted) = self.buffer.pop_front()
        {
            self.sum -= evicted;
        }

        (self.buffer.len() >= self.window).then(|| self.sum / self.buffer.len() as f64)
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.sum = 0.0;
    }
}

// ================================================================================================
// EMA: Exponential Moving Average
// ================================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ema {
    inner: Ewm,
}

impl Ema {
    pub fn new(window: u16) -> Self {
        // Standard EMA alpha = 2 / (span + 1)
        let alpha = 2.0 / (window as f64 + 1.0);
        Self {
            inner: Ewm::new(alpha, window as usize),
        }
    }
}

impl StreamingIndicator for Ema {
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        self.inner.update(value)
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

// ================================================================================================
// RSI: Relative Strength Index
// ================================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rsi {
    prev_price: Option<f64>,
    avg_gain: Ewm,
    avg_loss: Ewm,
}

impl Rsi {
    pub fn new(window: u16) -> Self {
        // Wilder's smoothing alpha = 1 / N, not the standard EMA alpha.
        let alpha = 1.0 / (window as f64);
        let window = window as usize;

        Self {
            prev_price: None,
            avg_gain: Ewm::new(alpha, window),
            avg_loss: Ewm::new(alpha, window),
        }
    }
}

impl StreamingIndicator for Rsi {
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        let Some(prev) = self.prev_price.replace(value) else {
            // First observation: no delta to work with yet.
            return None;
        };

        let delta = value - prev;
        let (gain, loss) = if delta > 0.0 {
            (delta, 0.0)
        } else {
            (0.0, delta.abs())
        };

        let avg_gain = self.avg_gain.update(gain);
        let avg_loss = self.avg_loss.update(loss);

        match (avg_gain, avg_loss) {
            (Some(gain), Some(loss)) => {
                if loss == 0.0 {
                    // Monotonic up-trend (or flat line) has no losses to ratio against.
                    if gain == 0.0 { Some(50.0) } else { Some(100.0) }
                } else {
                    let rs = gain / loss;
                    Some(100.0 - (100.0 / (1.0 + rs)))
                }
            }
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.prev_price = None;
        self.avg_gain.reset();
        self.avg_loss.reset();
    }
}

// ================================================================================================
// Bollinger Bands
// ================================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bollinger {
    window: usize,
    /// Band half-width in rolling standard deviations.
    width: f64,
    buffer: VecDeque<f64>,
}

impl Bollinger {
    pub fn new(window: u16, width: f64) -> Self {
        let window = window as usize;
        Self {
            window,
            width,
            buffer: VecDeque::with_capacity(window),
        }
    }
}

impl StreamingIndicator for Bollinger {
    type Output = Band;

    fn update(&mut self, value: f64) -> Option<Band> {
        self.buffer.push_back(value);
        if self.buffer.len() > self.window {
            self.buffer.pop_front();
        }

        if self.buffer.len() < self.window {
            return None;
        }

        let n = self.buffer.len() as f64;
        let mean = self.buffer.iter().sum::<f64>() / n;
        // Population variance over the full window.
        let variance = self.buffer.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let spread = self.width * variance.sqrt();

        Some(Band {
            lower: Price(mean - spread),
            mid: Price(mean),
            upper: Price(mean + spread),
        })
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}

// ================================================================================================
// MACD: Moving Average Convergence/Divergence
// ================================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Macd {
    fast: Ewm,
    slow: Ewm,
    signal: Ewm,
}

impl Macd {
    pub fn new(windows: MacdWindows) -> Self {
        let alpha = |span: u16| 2.0 / (span as f64 + 1.0);
        Self {
            fast: Ewm::new(alpha(windows.fast), windows.fast as usize),
            slow: Ewm::new(alpha(windows.slow), windows.slow as usize),
            signal: Ewm::new(alpha(windows.signal), windows.signal as usize),
        }
    }
}

impl StreamingIndicator for Macd {
    type Output = MacdValue;

    fn update(&mut self, value: f64) -> Option<MacdValue> {
        let fast = self.fast.update(value);
        let slow = self.slow.update(value);

        // The signal EMA only ever sees warm MACD line values, so its own
        // warm-up count starts once the slow EMA is ready.
        let (Some(fast), Some(slow)) = (fast, slow) else {
            return None;
        };

        let line = fast - slow;
        let signal = self.signal.update(line)?;

        Some(MacdValue {
            line,
            signal,
            histogram: line - signal,
        })
    }

    fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
        self.signal.reset();
    }
}
