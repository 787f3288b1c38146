//! Run-state error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::RunId;

/// Errors raised while recording runs or taking locks.
#[derive(Error, Debug)]
pub enum RunError {
    /// Failed to determine the application data directory.
    #[error("Failed to determine application data directory")]
    NoDataDir,

    /// Failed to create a directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to delete a file.
    #[error("Failed to delete file '{path}': {source}")]
    DeleteFile {
        /// The path that could not be deleted.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read a directory.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse a run file.
    #[error("Failed to parse run file '{path}': {source}")]
    ParseJson {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Failed to serialize a run record.
    #[error("Failed to serialize run: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// Run not found.
    #[error("Run not found: {0}")]
    RunNotFound(RunId),

    /// Another run holds the symbol's lock.
    #[error("Symbol {symbol} is locked by another run ({path})")]
    Locked {
        /// The locked symbol.
        symbol: String,
        /// The lock file.
        path: PathBuf,
        /// Process ID recorded in the lock file, if readable.
        pid: Option<u32>,
    },
}

/// Result type for run-state operations.
pub type Result<T> = std::result::Result<T, RunError>;
