//! Daily stock price extract, window and full-refresh load pipeline.
//!
//! This is a facade crate that re-exports functionality from the stockload
//! workspace crates and adds the [`Pipeline`] that composes them.
//!
//! # Quick Start
//!
//! ```ignore
//! use stockload_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::with_credential(std::env::var("ALPHAVANTAGE_API_KEY")?);
//!     let pipeline = Pipeline::from_config(&config)?;
//!     let mut warehouse = SqliteWarehouse::open("prices.db".as_ref())?;
//!
//!     let report = pipeline.run(&Symbol::new("FIVE")?, &mut warehouse).await?;
//!     println!("Loaded {} rows", report.rows_inserted);
//!     warehouse.close()?;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockload/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod pipeline;

pub use error::{Result, StockloadError};
pub use pipeline::{Pipeline, PipelineStage, RunReport};

// Re-export core types
pub use stockload_types::*;

pub use stockload_fetch::{ClientConfig, FetchClient, FetchError, SeriesSource, StaticSource};

pub use stockload_window::{Windower, parse_entry, window};

pub use stockload_warehouse::{
    ReplaceError, ReplaceOutcome, ReplaceStage, ReplaceSummary, Replacer, SqlValue,
    SqliteWarehouse, StoredRow, Transaction, Warehouse, WarehouseError,
};

pub use stockload_runs::{RunError, RunId, RunRecord, RunStatus, StateManager, SymbolLock};

#[cfg(feature = "format")]
pub use stockload_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, write_series,
};

/// Prelude module for convenient imports.
///
/// ```
/// use stockload_lib::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Pipeline, PipelineStage, RunReport, StockloadError};

    pub use stockload_types::{
        DailyRecord, DeleteScope, PipelineConfig, RawSeriesResponse, Symbol, TableName,
        WindowOrder, WindowSize, WindowedSeries,
    };

    pub use stockload_fetch::{FetchClient, SeriesSource, StaticSource};

    pub use stockload_warehouse::{ReplaceOutcome, Replacer, SqliteWarehouse, Warehouse};

    pub use stockload_runs::{RunRecord, RunStatus, StateManager};

    #[cfg(feature = "format")]
    pub use stockload_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
