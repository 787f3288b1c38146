//! JSON output format.

use std::io::Write;
use stockload_types::{Symbol, WindowedSeries};

use crate::{ExportRow, FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
///
/// Prices are written as strings so no precision is lost.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    style: JsonStyle,
    /// Array style only.
    pretty: bool,
}

impl JsonFormatter {
    /// Creates an array-style formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates an NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Formatter for JsonFormatter {
    fn write_series<W: Write + Send>(
        &self,
        symbol: &Symbol,
        series: &WindowedSeries,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let rows = series.iter().map(|record| ExportRow::new(symbol, record));

        match self.style {
            JsonStyle::Array => {
                let rows: Vec<_> = rows.collect();
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &rows)?;
                } else {
                    serde_json::to_writer(&mut writer, &rows)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for row in rows {
                    serde_json::to_writer(&mut writer, &row)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use std::io::Cursor;
    use stockload_types::DailyRecord;

    fn series(days: u32) -> WindowedSeries {
        WindowedSeries::new(
            (1..=days)
                .rev()
                .map(|day| {
                    DailyRecord::new(
                        NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                        dec!(117.3500),
                        dec!(119.6600),
                        dec!(117.2500),
                        dec!(117.8700),
                        286_038_878,
                    )
                })
                .collect(),
        )
    }

    fn render(formatter: &JsonFormatter, days: u32) -> String {
        let mut output = Cursor::new(Vec::new());
        formatter
            .write_series(&Symbol::new("FIVE").unwrap(), &series(days), &mut output)
            .unwrap();
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn test_json_array() {
        let result = render(&JsonFormatter::new(), 2);
        let parsed: Value = serde_json::from_str(&result).unwrap();

        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["symbol"], "FIVE");
        assert_eq!(rows[0]["date"], "2024-01-02");
        assert_eq!(rows[0]["close"], "117.8700");
        assert_eq!(rows[0]["volume"], 286_038_878);
    }

    #[test]
    fn test_ndjson() {
        let formatter = JsonFormatter::ndjson();
        let result = render(&formatter, 3);

        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.starts_with('{')));
        assert_eq!(formatter.extension(), "ndjson");
    }

    #[test]
    fn test_pretty_json() {
        let result = render(&JsonFormatter::new().with_pretty(true), 1);
        assert!(result.contains("\n  "));
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(render(&JsonFormatter::new(), 0), "[]\n");
        assert_eq!(render(&JsonFormatter::ndjson(), 0), "");
    }
}
