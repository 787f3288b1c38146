//! Transactional full-refresh loading for the stockload pipeline.
//!
//! This crate provides the load stage:
//!
//! - [`Warehouse`] - SQL execution and transaction control
//! - [`SqlValue`] - Parameter values bound to statements
//! - [`SqliteWarehouse`] - Bundled SQLite backend
//! - [`Transaction`] - Scoped transaction that rolls back unless committed
//! - [`Replacer`] - Ensure table, delete, insert, commit as one unit
//! - [`ReplaceOutcome`] - Committed or rolled-back result of a refresh

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockload/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod replacer;
mod sqlite;
pub mod statements;
mod transaction;
mod value;
mod warehouse;

pub use error::WarehouseError;
pub use replacer::{ReplaceError, ReplaceOutcome, ReplaceStage, ReplaceSummary, Replacer};
pub use sqlite::{SqliteWarehouse, StoredRow};
pub use transaction::Transaction;
pub use value::SqlValue;
pub use warehouse::Warehouse;
