//! Error types for stockload.

use thiserror::Error;

/// Errors raised when the upstream payload does not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The payload has no daily time series object.
    #[error("Response has no \"Time Series (Daily)\" object{}", api_message_suffix(.api_message))]
    MissingTimeSeries {
        /// Message reported by the API instead of data, if any.
        api_message: Option<String>,
    },

    /// A value that must be a JSON object is something else.
    #[error("Expected a JSON object for {0}")]
    NotAnObject(String),

    /// A series key is not a `YYYY-MM-DD` date.
    #[error("Invalid date key: {0}")]
    InvalidDate(String),

    /// A daily entry lacks one of the five value fields.
    #[error("Entry {date} is missing field \"{field}\"")]
    MissingField {
        /// The date of the entry.
        date: String,
        /// The missing field key.
        field: &'static str,
    },

    /// A daily field is not a numeric string.
    #[error("Entry {date} has non-numeric \"{field}\": {value}")]
    InvalidNumber {
        /// The date of the entry.
        date: String,
        /// The field key.
        field: &'static str,
        /// The offending raw value.
        value: String,
    },
}

fn api_message_suffix(message: &Option<String>) -> String {
    message
        .as_ref()
        .map_or_else(String::new, |msg| format!(" (API said: {msg})"))
}

/// Errors for invalid configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API credential is empty.
    #[error("API credential is empty")]
    EmptyCredential,

    /// The ticker symbol is empty or contains unsupported characters.
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// The table identifier is not a dotted list of plain identifiers.
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    /// The window size is zero.
    #[error("Window size must be a positive integer, got {0}")]
    InvalidWindowSize(usize),

    /// Unknown window ordering.
    #[error("Unknown window order: {0} (expected most-recent or upstream)")]
    UnknownWindowOrder(String),

    /// Unknown delete scope.
    #[error("Unknown delete scope: {0} (expected table or symbol)")]
    UnknownDeleteScope(String),

    /// The endpoint is empty.
    #[error("Endpoint is empty")]
    EmptyEndpoint,
}
