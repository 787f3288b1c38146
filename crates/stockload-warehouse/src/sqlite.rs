//! SQLite warehouse backend.

use chrono::NaiveDateTime;
use rusqlite::types::{ToSql, ToSqlOutput, Value};
use rusqlite::{Connection, params_from_iter};
use std::path::Path;
use stockload_types::{Symbol, TableName};

use crate::value::TIMESTAMP_FORMAT;
use crate::{SqlValue, Warehouse, WarehouseError};

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Text(text) => ToSqlOutput::from(text.as_str()),
            Self::Integer(value) => ToSqlOutput::from(*value),
            Self::Real(value) => ToSqlOutput::from(*value),
            Self::Timestamp(ts) => {
                ToSqlOutput::Owned(Value::Text(ts.format(TIMESTAMP_FORMAT).to_string()))
            }
        })
    }
}

/// A row read back from the target table.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    /// Ticker symbol.
    pub symbol: String,
    /// Trading day, as stored.
    pub date: NaiveDateTime,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: i64,
}

/// Warehouse backed by a SQLite database file or in-memory database.
///
/// The connection is closed when the warehouse is dropped.
#[derive(Debug)]
pub struct SqliteWarehouse {
    conn: Connection,
}

impl SqliteWarehouse {
    /// Opens (creating if needed) a SQLite database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(path: &Path) -> Result<Self, WarehouseError> {
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened SQLite warehouse");
        Ok(Self { conn })
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn open_in_memory() -> Result<Self, WarehouseError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Returns the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, reporting any error instead of ignoring it.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite fails to close the connection.
    pub fn close(self) -> Result<(), WarehouseError> {
        self.conn.close().map_err(|(_, e)| WarehouseError::Sqlite(e))
    }

    /// Returns true if the table exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be queried.
    pub fn table_exists(&self, table: &TableName) -> Result<bool, WarehouseError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table.base_name()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Reads the rows of `table`, optionally only those of `symbol`, ordered
    /// by symbol then newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored date cannot be parsed.
    pub fn rows(
        &self,
        table: &TableName,
        symbol: Option<&Symbol>,
    ) -> Result<Vec<StoredRow>, WarehouseError> {
        let filter = if symbol.is_some() {
            " WHERE symbol = ?1"
        } else {
            ""
        };
        let sql = format!(
            "SELECT symbol, date, open, high, low, close, volume FROM {table}{filter} ORDER BY symbol, date DESC"
        );
        let params: Vec<&str> = symbol.iter().map(|s| s.as_str()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params), |row| {
                let date: String = row.get(1)?;
                Ok((
                    date,
                    StoredRow {
                        symbol: row.get(0)?,
                        date: NaiveDateTime::default(),
                        open: row.get(2)?,
                        high: row.get(3)?,
                        low: row.get(4)?,
                        close: row.get(5)?,
                        volume: row.get(6)?,
                    },
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(date, mut row)| {
                row.date = NaiveDateTime::parse_from_str(&date, TIMESTAMP_FORMAT).map_err(|_| {
                    WarehouseError::Conversion {
                        field: "date",
                        value: date.clone(),
                    }
                })?;
                Ok(row)
            })
            .collect()
    }

    /// Counts the rows of `table`, optionally only those of `symbol`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_rows(
        &self,
        table: &TableName,
        symbol: Option<&Symbol>,
    ) -> Result<usize, WarehouseError> {
        let count: i64 = match symbol {
            Some(symbol) => self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {table} WHERE symbol = ?1"),
                [symbol.as_str()],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?,
        };
        usize::try_from(count).map_err(|_| WarehouseError::Conversion {
            field: "count",
            value: count.to_string(),
        })
    }
}

impl Warehouse for SqliteWarehouse {
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize, WarehouseError> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        Ok(stmt.execute(params_from_iter(params))?)
    }

    fn begin(&mut self) -> Result<(), WarehouseError> {
        Ok(self.conn.execute_batch("BEGIN")?)
    }

    fn commit(&mut self) -> Result<(), WarehouseError> {
        Ok(self.conn.execute_batch("COMMIT")?)
    }

    fn rollback(&mut self) -> Result<(), WarehouseError> {
        Ok(self.conn.execute_batch("ROLLBACK")?)
    }
}
