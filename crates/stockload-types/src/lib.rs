//! Core types for the stockload daily price pipeline.
//!
//! This crate provides the fundamental data structures used throughout stockload:
//!
//! - [`Symbol`] - Normalized ticker symbol
//! - [`DailyRecord`] - One day of open/high/low/close/volume data
//! - [`RawSeriesResponse`] - Decoded upstream payload, before windowing
//! - [`WindowedSeries`] - Bounded, ordered run of daily records
//! - [`TableName`] - Validated warehouse table identifier
//! - [`PipelineConfig`] - Explicit configuration for one pipeline run

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockload/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod record;
mod symbol;
mod table;
mod window;

pub use config::{Credential, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, DeleteScope, PipelineConfig};
pub use error::{ConfigError, ShapeError};
pub use record::{DailyRecord, RawSeriesResponse, WindowedSeries};
pub use symbol::Symbol;
pub use table::{DEFAULT_TABLE, TableName};
pub use window::{DEFAULT_WINDOW_SIZE, WindowOrder, WindowSize};
