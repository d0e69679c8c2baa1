use crate::data::{domain::Price, record::DailyRecord};

/// Price snapshot of the session under the cursor, refreshed before every
/// action is applied.
///
/// The backing slice is ordered newest-first (index 0 = most recent session),
/// so "next day" is `cursor - 1` and "previous day" is `cursor + 1`. Both
/// neighbours are bounded at the sequence edges: the oldest session is its own
/// previous day and the newest is its own next day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayView {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    /// Close of the day one step closer to the present.
    pub next_close: Price,
    /// Close of the day one step further in the past.
    pub prev_close: Price,
}

impl DayView {
    pub fn at(records: &[DailyRecord], cursor: usize) -> Option<Self> {
        let today = records.get(cursor)?;
        let next = &records[cursor.saturating_sub(1)];
        let prev = &records[(cursor + 1).min(records.len() - 1)];

        Some(Self {
            open: today.open,
            high: today.high,
            low: today.low,
            close: today.close,
            next_close: next.close,
            prev_close: prev.close,
        })
    }
}

#[cfg(test)]
mod test {
    use chrono::{DateTime, Duration, Utc};

    use super::*;
    use crate::data::domain::{Price, Quantity};

    /// Newest-first records with the given closes.
    fn records(closes: &[f64]) -> Vec<DailyRecord> {
        let newest = DateTime::<Utc>::UNIX_EPOCH + Duration::days(20_000);
        closes
            .iter()
            .enumerate()
            .map(|(age, &close)| DailyRecord {
                timestamp: newest - Duration::days(age as i64),
                open: Price(close),
                high: Price(close + 1.0),
                low: Price(close - 1.0),
                close: Price(close),
                volume: Quantity(1_000.0),
            })
            .collect()
    }

    #[test]
    fn test_view_next_is_one_step_closer_to_present() {
        let recs = records(&[10.0, 11.0, 9.0, 12.0, 8.0]);

        let view = DayView::at(&recs, 4).unwrap();
        assert_eq!(view.close, Price(8.0));
        assert_eq!(view.next_close, Price(12.0), "next day is cursor - 1");
        assert_eq!(
            view.prev_close,
            Price(8.0),
            "oldest session is bounded to itself"
        );
    }

    #[test]
    fn test_view_bounded_at_newest_edge() {
        let recs = records(&[10.0, 11.0, 9.0]);

        let view = DayView::at(&recs, 0).unwrap();
        assert_eq!(view.next_close, Price(10.0), "newest is its own next day");
        assert_eq!(view.prev_close, Price(11.0));
    }

    #[test]
    fn test_view_out_of_bounds_is_none() {
        let recs = records(&[10.0, 11.0]);
        assert!(DayView::at(&recs, 2).is_none());
    }
}
