//! Output format abstraction.

use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;
use stockload_types::{DailyRecord, Symbol, WindowedSeries};
use thiserror::Error;

use crate::{CsvFormatter, JsonFormatter};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json, Self::Ndjson]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One exported row: a daily record tagged with its symbol, shaped like a
/// row of the target table.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow<'a> {
    /// Ticker symbol.
    pub symbol: &'a str,
    /// Trading day as `YYYY-MM-DD`.
    pub date: String,
    /// Opening price.
    pub open: Decimal,
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume.
    pub volume: u64,
}

impl<'a> ExportRow<'a> {
    /// Tags `record` with `symbol`.
    #[must_use]
    pub fn new(symbol: &'a Symbol, record: &DailyRecord) -> Self {
        Self {
            symbol: symbol.as_str(),
            date: record.date().format("%Y-%m-%d").to_string(),
            open: record.open(),
            high: record.high(),
            low: record.low(),
            close: record.close(),
            volume: record.volume(),
        }
    }
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes a windowed series for `symbol` to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_series<W: Write + Send>(
        &self,
        symbol: &Symbol,
        series: &WindowedSeries,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

/// Writes `series` in `format` with that format's default settings.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_series<W: Write + Send>(
    format: OutputFormat,
    symbol: &Symbol,
    series: &WindowedSeries,
    writer: W,
) -> Result<(), FormatError> {
    match format {
        OutputFormat::Csv => CsvFormatter::new().write_series(symbol, series, writer),
        OutputFormat::Json => JsonFormatter::new()
            .with_pretty(true)
            .write_series(symbol, series, writer),
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_series(symbol, series, writer),
    }
}
