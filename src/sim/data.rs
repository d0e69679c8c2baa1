use std::sync::Arc;

use itertools::izip;

use crate::{
    data::{
        indicator::{IndicatorConfig, IndicatorRow},
        record::DailyRecord,
    },
    error::{DataError, StockGymResult},
    math::indicator::{Bollinger, Macd, Rsi, StreamingIndicator},
};

/// Shared, immutable simulation data backing an environment.
///
/// Holds the aligned history: one `DailyRecord` per `IndicatorRow`, restricted
/// to days where every indicator is warm. Both slices are stored newest-first
/// (index 0 = most recent session), the ordering the reverse-walk cursor
/// relies on. Environments hold this behind an `Arc` and never mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationData {
    records: Arc<[DailyRecord]>,
    indicators: Arc<[IndicatorRow]>,
}

impl SimulationData {
    /// Builds the aligned history from raw feed output.
    ///
    /// Records arrive in provider-native order and are normalized to
    /// chronological before the indicators stream over them oldest to newest.
    /// Warm-up days where any indicator is still undefined are trimmed, then
    /// the remainder is flipped into the newest-first storage order.
    #[tracing::instrument(skip(records), fields(raw_rows = records.len()))]
    pub fn build(mut records: Vec<DailyRecord>, cfg: &IndicatorConfig) -> Self {
        records.sort_by_key(|r| r.timestamp);

        let mut bollinger = Bollinger::new(cfg.bollinger.0, cfg.band_width);
        let mut rsi = Rsi::new(cfg.rsi.0);
        let mut macd = Macd::new(cfg.macd);

        let bands: Vec<_> = records.iter().map(|r| bollinger.update(r.close.0)).collect();
        let rsis: Vec<_> = records.iter().map(|r| rsi.update(r.close.0)).collect();
        let macds: Vec<_> = records.iter().map(|r| macd.update(r.close.0)).collect();

        let mut aligned: Vec<(DailyRecord, IndicatorRow)> = izip!(records, bands, rsis, macds)
            .filter_map(|(record, band, rsi, macd)| {
                let row = IndicatorRow {
                    band: band?,
                    rsi: rsi?,
                    macd: macd?,
                };
                Some((record, row))
            })
            .collect();

        // Chronological -> newest-first.
        aligned.reverse();
        let (records, indicators): (Vec<_>, Vec<_>) = aligned.into_iter().unzip();

        tracing::info!(aligned_rows = records.len(), "aligned history built");

        Self {
            records: records.into(),
            indicators: indicators.into(),
        }
    }

    /// Wraps pre-aligned newest-first slices, e.g. indicator tables computed
    /// elsewhere. Fails when the two sides disagree on length.
    pub fn from_aligned(
        records: Vec<DailyRecord>,
        indicators: Vec<IndicatorRow>,
    ) -> StockGymResult<Self> {
        if records.len() != indicators.len() {
            return Err(DataError::MisalignedHistory {
                records: records.len(),
                indicators: indicators.len(),
            }
            .into());
        }

        Ok(Self {
            records: records.into(),
            indicators: indicators.into(),
        })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn indicators(&self) -> &[IndicatorRow] {
        &self.indicators
    }

    /// Number of aligned rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
