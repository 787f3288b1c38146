//! HTTP client and data fetching for the stockload pipeline.
//!
//! This crate provides the extract stage:
//!
//! - [`url::series_url`] - Constructs `TIME_SERIES_DAILY` request URLs
//! - [`FetchClient`] - HTTP client issuing one request per run
//! - [`SeriesSource`] - Abstraction over where a raw series comes from
//! - [`StaticSource`] - Serves a saved response instead of calling the API

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockload/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod source;
pub mod url;

pub use client::{ClientConfig, FetchClient, FetchError};
pub use source::{SeriesSource, StaticSource};
