//! SQL text for the target table.
//!
//! The table identifier is the only thing spliced into statement text, and
//! [`TableName`] only admits plain identifiers. Every value is a `?`
//! placeholder.

use stockload_types::{DeleteScope, TableName};

/// Column list of the target table, in insert order.
pub const COLUMNS: [&str; 7] = ["symbol", "date", "open", "high", "low", "close", "volume"];

/// `CREATE TABLE IF NOT EXISTS` for the target table, keyed on `(symbol, date)`.
#[must_use]
pub fn create_table(table: &TableName) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
  symbol varchar NOT NULL,
  date timestamp NOT NULL,
  open float,
  high float,
  low float,
  close float,
  volume number,
  PRIMARY KEY (symbol, date)
)"
    )
}

/// `DELETE` for the extent replaced by a refresh.
///
/// [`DeleteScope::Symbol`] takes the symbol as its only parameter.
#[must_use]
pub fn delete(table: &TableName, scope: DeleteScope) -> String {
    match scope {
        DeleteScope::Table => format!("DELETE FROM {table}"),
        DeleteScope::Symbol => format!("DELETE FROM {table} WHERE symbol = ?"),
    }
}

/// Parameterized `INSERT` of one row.
#[must_use]
pub fn insert(table: &TableName) -> String {
    let placeholders = vec!["?"; COLUMNS.len()].join(", ");
    format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        COLUMNS.join(", ")
    )
}
