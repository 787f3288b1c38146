//! Daily record windowing for the stockload pipeline.
//!
//! This crate provides the transform stage:
//!
//! - [`parse_entry`] - Builds one [`DailyRecord`](stockload_types::DailyRecord) from a dated entry
//! - [`Windower`] - Orders and truncates a raw series to a bounded window
//! - [`window`] - Convenience function using the default ordering

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockload/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod parse;
mod windower;

pub use parse::{CLOSE_KEY, HIGH_KEY, LOW_KEY, OPEN_KEY, VOLUME_KEY, parse_entry};
pub use windower::{Windower, window};
