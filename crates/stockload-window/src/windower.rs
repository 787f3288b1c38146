//! Windowing of a raw daily series.

use std::cmp::Reverse;
use stockload_types::{
    DailyRecord, RawSeriesResponse, ShapeError, WindowOrder, WindowSize, WindowedSeries,
};

use crate::parse_entry;

/// Turns a raw series into a bounded window of daily records.
///
/// Every dated entry is parsed; the records are then ordered according to
/// the [`WindowOrder`] and truncated to the window size. A window larger than
/// the series returns the whole series, without padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Windower {
    size: WindowSize,
    order: WindowOrder,
}

impl Windower {
    /// Creates a windower with the given size and ordering.
    #[must_use]
    pub const fn new(size: WindowSize, order: WindowOrder) -> Self {
        Self { size, order }
    }

    /// Returns the window size.
    #[must_use]
    pub const fn size(&self) -> WindowSize {
        self.size
    }

    /// Returns the ordering applied before truncation.
    #[must_use]
    pub const fn order(&self) -> WindowOrder {
        self.order
    }

    /// Windows the raw series.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if the payload has no daily series object or
    /// any entry cannot be parsed. When the API sent a message instead of
    /// data, the error carries it.
    pub fn window(&self, raw: &RawSeriesResponse) -> Result<WindowedSeries, ShapeError> {
        let series = raw
            .time_series()
            .ok_or_else(|| ShapeError::MissingTimeSeries {
                api_message: raw.api_message().map(str::to_string),
            })?
            .as_object()
            .ok_or_else(|| ShapeError::NotAnObject(RawSeriesResponse::TIME_SERIES_KEY.to_string()))?;

        if let Some(message) = raw.api_message() {
            tracing::warn!(notice = message, "upstream returned a notice alongside data");
        }

        let mut records = series
            .iter()
            .map(|(date, fields)| parse_entry(date, fields))
            .collect::<Result<Vec<DailyRecord>, _>>()?;
        let available = records.len();

        if self.order == WindowOrder::MostRecent {
            records.sort_by_key(|record| Reverse(record.date()));
        }
        records.truncate(self.size.get());

        tracing::debug!(
            available,
            kept = records.len(),
            order = %self.order,
            "windowed daily series"
        );
        Ok(WindowedSeries::new(records))
    }
}

/// Windows `raw` to at most `limit` records, most recent first.
///
/// # Errors
///
/// Returns a [`ShapeError`] if the payload is malformed.
pub fn window(raw: &RawSeriesResponse, limit: WindowSize) -> Result<WindowedSeries, ShapeError> {
    Windower::new(limit, WindowOrder::MostRecent).window(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use rust_decimal_macros::dec;
    use serde_json::{Map, Value, json};

    fn entry(close: &str) -> Value {
        json!({
            "1. open": "10.5",
            "2. high": "11.0",
            "3. low": "10.0",
            "4. close": close,
            "5. volume": "1000"
        })
    }

    /// Builds a payload with `days` consecutive dates, newest first like the API.
    fn payload(days: u64) -> RawSeriesResponse {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut series = Map::new();
        for offset in (0..days).rev() {
            let date = start.checked_add_days(Days::new(offset)).unwrap();
            series.insert(date.format("%Y-%m-%d").to_string(), entry("10.8"));
        }
        RawSeriesResponse::new(json!({
            "Meta Data": {"2. Symbol": "FIVE"},
            "Time Series (Daily)": Value::Object(series),
        }))
    }

    fn size(n: usize) -> WindowSize {
        WindowSize::new(n).unwrap()
    }

    #[test]
    fn test_window_truncates_to_min_of_len_and_limit() {
        for (days, limit) in [(0, 90), (5, 90), (90, 90), (120, 90), (120, 1), (3, 3)] {
            let windowed = window(&payload(days), size(limit)).unwrap();
            assert_eq!(windowed.len(), (days as usize).min(limit), "days={days} limit={limit}");
        }
    }

    #[test]
    fn test_window_keeps_most_recent_days() {
        let windowed = window(&payload(120), size(90)).unwrap();
        let (first, last) = windowed.date_span().unwrap();

        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 4, 29).unwrap());
        assert_eq!((last - first).num_days(), 89);
        assert_eq!(windowed.records()[0].date(), last);
    }

    #[test]
    fn test_most_recent_order_ignores_upstream_order() {
        let raw = RawSeriesResponse::new(json!({
            "Time Series (Daily)": {
                "2024-01-01": entry("1"),
                "2024-01-03": entry("3"),
                "2024-01-02": entry("2"),
            }
        }));

        let windowed = Windower::new(size(2), WindowOrder::MostRecent)
            .window(&raw)
            .unwrap();
        let closes: Vec<_> = windowed.iter().map(DailyRecord::close).collect();
        assert_eq!(closes, [dec!(3), dec!(2)]);
    }

    #[test]
    fn test_upstream_order_takes_first_entries() {
        let raw = RawSeriesResponse::new(json!({
            "Time Series (Daily)": {
                "2024-01-01": entry("1"),
                "2024-01-03": entry("3"),
                "2024-01-02": entry("2"),
            }
        }));

        let windowed = Windower::new(size(2), WindowOrder::Upstream)
            .window(&raw)
            .unwrap();
        let closes: Vec<_> = windowed.iter().map(DailyRecord::close).collect();
        assert_eq!(closes, [dec!(1), dec!(3)]);
    }

    #[test]
    fn test_window_missing_series_reports_api_message() {
        let raw = RawSeriesResponse::new(json!({
            "Error Message": "Invalid API call."
        }));

        let result = window(&raw, size(90));
        assert_eq!(
            result,
            Err(ShapeError::MissingTimeSeries {
                api_message: Some("Invalid API call.".to_string()),
            })
        );
    }

    #[test]
    fn test_window_series_not_an_object() {
        let raw = RawSeriesResponse::new(json!({"Time Series (Daily)": []}));
        assert!(matches!(
            window(&raw, size(90)),
            Err(ShapeError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_window_bad_entry_fails_whole_window() {
        let raw = RawSeriesResponse::new(json!({
            "Time Series (Daily)": {
                "2024-01-02": entry("10.8"),
                "2024-01-01": {"1. open": "10.5"},
            }
        }));

        assert!(matches!(
            window(&raw, size(1)),
            Err(ShapeError::MissingField { .. })
        ));
    }
}
