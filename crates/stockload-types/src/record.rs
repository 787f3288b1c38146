//! Daily price records and the raw upstream payload.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The decoded upstream response body.
///
/// Only guaranteed to be valid JSON. The key order of every object is kept
/// as received, so windowing can reproduce the upstream iteration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSeriesResponse(Value);

impl RawSeriesResponse {
    /// Key of the daily time series object.
    pub const TIME_SERIES_KEY: &'static str = "Time Series (Daily)";

    /// Keys the API uses to report errors, throttling, or notices in place of data.
    pub const MESSAGE_KEYS: [&'static str; 3] = ["Error Message", "Note", "Information"];

    /// Wraps an already decoded JSON value.
    #[must_use]
    pub const fn new(body: Value) -> Self {
        Self(body)
    }

    /// Decodes a response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Self)
    }

    /// Returns the decoded body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.0
    }

    /// Returns the daily time series object, if present.
    #[must_use]
    pub fn time_series(&self) -> Option<&Value> {
        self.0.get(Self::TIME_SERIES_KEY)
    }

    /// Returns the first API message (error, note, or information) found in the body.
    #[must_use]
    pub fn api_message(&self) -> Option<&str> {
        Self::MESSAGE_KEYS
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_str))
    }

    /// Consumes the response, returning the decoded body.
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// One trading day of price data.
///
/// Records are immutable once constructed; all five values are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyRecord {
    date: NaiveDate,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: u64,
}

impl DailyRecord {
    /// Creates a new daily record.
    #[must_use]
    pub const fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Trading date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Opening price.
    #[must_use]
    pub const fn open(&self) -> Decimal {
        self.open
    }

    /// Highest price of the day.
    #[must_use]
    pub const fn high(&self) -> Decimal {
        self.high
    }

    /// Lowest price of the day.
    #[must_use]
    pub const fn low(&self) -> Decimal {
        self.low
    }

    /// Closing price.
    #[must_use]
    pub const fn close(&self) -> Decimal {
        self.close
    }

    /// Traded volume.
    #[must_use]
    pub const fn volume(&self) -> u64 {
        self.volume
    }
}

/// An ordered, bounded run of daily records produced by windowing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowedSeries(Vec<DailyRecord>);

impl WindowedSeries {
    /// Wraps records that are already in window order.
    #[must_use]
    pub const fn new(records: Vec<DailyRecord>) -> Self {
        Self(records)
    }

    /// Returns the records in window order.
    #[must_use]
    pub fn records(&self) -> &[DailyRecord] {
        &self.0
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the window holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, DailyRecord> {
        self.0.iter()
    }

    /// Returns the earliest and latest dates in the window.
    #[must_use]
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.0.iter().map(DailyRecord::date).min()?;
        let last = self.0.iter().map(DailyRecord::date).max()?;
        Some((first, last))
    }
}

impl<'a> IntoIterator for &'a WindowedSeries {
    type Item = &'a DailyRecord;
    type IntoIter = std::slice::Iter<'a, DailyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for WindowedSeries {
    type Item = DailyRecord;
    type IntoIter = std::vec::IntoIter<DailyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
