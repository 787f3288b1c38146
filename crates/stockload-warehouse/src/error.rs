//! Warehouse error types.

use thiserror::Error;

/// Errors raised by a warehouse backend.
#[derive(Error, Debug)]
pub enum WarehouseError {
    /// SQLite reported an error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A value cannot be represented in the target column type.
    #[error("Cannot store {field} value {value} in the warehouse")]
    Conversion {
        /// Column the value was bound for.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// Any other backend failure.
    #[error("Warehouse error: {0}")]
    Backend(String),
}
