//! Top-level error type.

use stockload_fetch::FetchError;
use stockload_runs::RunError;
use stockload_types::{ConfigError, ShapeError};
use stockload_warehouse::{ReplaceError, WarehouseError};
use thiserror::Error;

/// Any error a pipeline run can end with.
#[derive(Error, Debug)]
pub enum StockloadError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The upstream request failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The upstream payload did not have the expected shape.
    #[error("Unexpected payload: {0}")]
    Shape(#[from] ShapeError),

    /// The warehouse could not be reached or queried.
    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    /// The full-refresh transaction was rolled back.
    #[error(transparent)]
    Replace(#[from] ReplaceError),

    /// Run history or locking failed.
    #[error(transparent)]
    Run(#[from] RunError),

    /// Writing an export failed.
    #[cfg(feature = "format")]
    #[error(transparent)]
    Format(#[from] stockload_format::FormatError),
}

impl StockloadError {
    /// Returns the replace stage reached, if the load failed.
    #[must_use]
    pub fn replace_stage(&self) -> Option<stockload_warehouse::ReplaceStage> {
        match self {
            Self::Replace(e) => Some(e.stage()),
            _ => None,
        }
    }
}

/// Result type using [`StockloadError`].
pub type Result<T> = std::result::Result<T, StockloadError>;
