use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::domain::{Price, Volume};

/// Immutable snapshot of one trading session.
///
/// Produced once per symbol per run by the feed collaborator and shared
/// read-only with the environment afterwards.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Close-of-session timestamp identifying the trading day.
    pub timestamp: DateTime<Utc>,
    /// The opening price.
    pub open: Price,
    /// The highest price traded during the session.
    pub high: Price,
    /// The lowest price traded during the session.
    pub low: Price,
    /// The closing price. This is the NAV for any transaction on this day.
    pub close: Price,
    /// The total traded volume.
    pub volume: Volume,
}
