//! Run history and per-symbol locking for stockload.
//!
//! - [`RunId`] - Unique identifier for a pipeline run
//! - [`RunStatus`] - Lifecycle state of a run
//! - [`RunRecord`] - Persisted description of one run
//! - [`StateManager`] - Stores run records and lock files on disk
//! - [`SymbolLock`] - Exclusive per-symbol lock released on drop

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockload/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod lock;
mod run;
mod state;

pub use error::{Result, RunError};
pub use lock::SymbolLock;
pub use run::{RunId, RunRecord, RunStatus};
pub use state::{StateManager, is_process_running};
