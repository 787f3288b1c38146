//! The warehouse abstraction.

use crate::{SqlValue, WarehouseError};

/// A SQL connection that can run statements and control transactions.
///
/// This is the only surface the [`Replacer`](crate::Replacer) needs from a
/// warehouse, so any backend (SQLite, a cloud warehouse driver, a test
/// double) can sit behind it.
pub trait Warehouse {
    /// Executes one statement with positional `?` parameters, returning the
    /// number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the statement.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize, WarehouseError>;

    /// Starts a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    fn begin(&mut self) -> Result<(), WarehouseError> {
        self.execute("BEGIN", &[]).map(drop)
    }

    /// Commits the current transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails; the transaction is then still open.
    fn commit(&mut self) -> Result<(), WarehouseError> {
        self.execute("COMMIT", &[]).map(drop)
    }

    /// Rolls back the current transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    fn rollback(&mut self) -> Result<(), WarehouseError> {
        self.execute("ROLLBACK", &[]).map(drop)
    }
}

impl<W: Warehouse + ?Sized> Warehouse for &mut W {
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize, WarehouseError> {
        (**self).execute(sql, params)
    }

    fn begin(&mut self) -> Result<(), WarehouseError> {
        (**self).begin()
    }

    fn commit(&mut self) -> Result<(), WarehouseError> {
        (**self).commit()
    }

    fn rollback(&mut self) -> Result<(), WarehouseError> {
        (**self).rollback()
    }
}
