//! Scoped transactions.

use crate::{SqlValue, Warehouse, WarehouseError};

/// An open transaction on a warehouse.
///
/// The transaction rolls back when dropped unless [`commit`](Self::commit)
/// or [`rollback`](Self::rollback) already finished it, so every exit path
/// (early return, `?`, panic) leaves the warehouse without a dangling
/// transaction.
#[derive(Debug)]
pub struct Transaction<'w, W: Warehouse + ?Sized> {
    warehouse: &'w mut W,
    open: bool,
}

impl<'w, W: Warehouse + ?Sized> Transaction<'w, W> {
    /// Starts a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the warehouse cannot begin a transaction.
    pub fn begin(warehouse: &'w mut W) -> Result<Self, WarehouseError> {
        warehouse.begin()?;
        Ok(Self {
            warehouse,
            open: true,
        })
    }

    /// Executes a statement inside the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize, WarehouseError> {
        tracing::trace!(sql, params = params.len(), "executing statement");
        self.warehouse.execute(sql, params)
    }

    /// Returns true until the transaction is committed or rolled back.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Commits the transaction.
    ///
    /// If the commit fails the transaction stays open and is rolled back by
    /// [`rollback`](Self::rollback) or on drop.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub fn commit(&mut self) -> Result<(), WarehouseError> {
        if self.open {
            self.warehouse.commit()?;
            self.open = false;
        }
        Ok(())
    }

    /// Rolls the transaction back. Does nothing if already finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails. The transaction is considered
    /// finished either way.
    pub fn rollback(&mut self) -> Result<(), WarehouseError> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.warehouse.rollback()
    }
}

impl<W: Warehouse + ?Sized> Drop for Transaction<'_, W> {
    fn drop(&mut self) {
        if let Err(e) = self.rollback() {
            tracing::error!(error = %e, "rollback of abandoned transaction failed");
        }
    }
}
