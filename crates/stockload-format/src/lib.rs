//! Export formats for windowed stockload series.
//!
//! This crate provides formatters for writing a windowed daily series:
//!
//! - [`CsvFormatter`] - CSV or TSV
//! - [`JsonFormatter`] - JSON array or NDJSON
//! - [`OutputFormat`] - Format selection by name

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockload/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

pub use crate::csv::CsvFormatter;
pub use formatter::{ExportRow, FormatError, Formatter, OutputFormat, write_series};
pub use json::{JsonFormatter, JsonStyle};
