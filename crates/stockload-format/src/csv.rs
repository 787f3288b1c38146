//! CSV output format.

use std::io::Write;
use stockload_types::{Symbol, WindowedSeries};

use crate::{FormatError, Formatter};

/// CSV formatter.
///
/// Columns follow the target table: `symbol,date,open,high,low,close,volume`.
/// Prices keep the precision the API reported.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    delimiter: char,
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a comma-separated formatter with a header row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }
}

impl Formatter for CsvFormatter {
    fn write_series<W: Write + Send>(
        &self,
        symbol: &Symbol,
        series: &WindowedSeries,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "symbol{d}date{d}open{d}high{d}low{d}close{d}volume")?;
        }

        for record in series {
            writeln!(
                writer,
                "{symbol}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                record.date().format("%Y-%m-%d"),
                record.open(),
                record.high(),
                record.low(),
                record.close(),
                record.volume()
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
