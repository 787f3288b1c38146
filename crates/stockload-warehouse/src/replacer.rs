//! Full-refresh replace of the target table.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use stockload_types::{DailyRecord, DeleteScope, PipelineConfig, Symbol, TableName, WindowedSeries};
use thiserror::Error;

use crate::{SqlValue, Transaction, Warehouse, WarehouseError, statements};

/// The furthest point a replace reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceStage {
    /// Transaction opened, table not yet ensured.
    Open,
    /// Target table exists.
    SchemaEnsured,
    /// Current extent deleted.
    Truncated,
    /// Inserting the record at this zero-based index.
    Inserting(usize),
    /// All rows inserted, commit issued.
    Committing,
}

impl std::fmt::Display for ReplaceStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "ensuring table"),
            Self::SchemaEnsured => write!(f, "deleting rows"),
            Self::Truncated => write!(f, "preparing inserts"),
            Self::Inserting(index) => write!(f, "inserting record {index}"),
            Self::Committing => write!(f, "committing"),
        }
    }
}

/// A replace that was rolled back.
#[derive(Error, Debug)]
#[error("Replace failed while {stage}: {source}")]
pub struct ReplaceError {
    stage: ReplaceStage,
    #[source]
    source: WarehouseError,
    rollback_error: Option<WarehouseError>,
}

impl ReplaceError {
    /// Returns the stage the replace reached before failing.
    #[must_use]
    pub const fn stage(&self) -> ReplaceStage {
        self.stage
    }

    /// Returns the error that aborted the replace.
    #[must_use]
    pub const fn cause(&self) -> &WarehouseError {
        &self.source
    }

    /// Returns the error raised by the rollback itself, if it also failed.
    #[must_use]
    pub const fn rollback_error(&self) -> Option<&WarehouseError> {
        self.rollback_error.as_ref()
    }
}

/// What a committed replace did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceSummary {
    /// Symbol the rows were tagged with.
    pub symbol: Symbol,
    /// Table that was refreshed.
    pub table: TableName,
    /// Rows removed by the delete.
    pub rows_deleted: usize,
    /// Rows inserted.
    pub rows_inserted: usize,
}

/// Result of [`Replacer::replace`].
#[must_use]
#[derive(Debug)]
pub enum ReplaceOutcome {
    /// The transaction committed.
    Committed(ReplaceSummary),
    /// The transaction was rolled back; the table is unchanged.
    RolledBack(ReplaceError),
}

impl ReplaceOutcome {
    /// Returns true if the replace committed.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    /// Converts the outcome into a `Result` for `?` propagation.
    ///
    /// # Errors
    ///
    /// Returns the [`ReplaceError`] of a rolled-back replace.
    pub fn into_result(self) -> Result<ReplaceSummary, ReplaceError> {
        match self {
            Self::Committed(summary) => Ok(summary),
            Self::RolledBack(error) => Err(error),
        }
    }
}

/// Replaces the contents of a table with a windowed series in one
/// transaction: ensure the table, delete the current extent, insert every
/// record, commit. Any failure rolls everything back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacer {
    table: TableName,
    scope: DeleteScope,
}

impl Replacer {
    /// Creates a replacer for `table` deleting with the given scope.
    #[must_use]
    pub const fn new(table: TableName, scope: DeleteScope) -> Self {
        Self { table, scope }
    }

    /// Creates a replacer from the table and delete scope of a config.
    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.table_name.clone(), config.delete_scope)
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &TableName {
        &self.table
    }

    /// Returns the delete scope.
    #[must_use]
    pub const fn scope(&self) -> DeleteScope {
        self.scope
    }

    /// Replaces the target extent with `records`, each tagged with `symbol`.
    pub fn replace<W: Warehouse + ?Sized>(
        &self,
        warehouse: &mut W,
        records: &WindowedSeries,
        symbol: &Symbol,
    ) -> ReplaceOutcome {
        let mut stage = ReplaceStage::Open;

        let mut tx = match Transaction::begin(warehouse) {
            Ok(tx) => tx,
            Err(source) => {
                return self.rolled_back(ReplaceError {
                    stage,
                    source,
                    rollback_error: None,
                });
            }
        };

        match self.apply(&mut tx, records, symbol, &mut stage) {
            Ok(summary) => {
                tracing::info!(
                    symbol = %summary.symbol,
                    table = %summary.table,
                    deleted = summary.rows_deleted,
                    inserted = summary.rows_inserted,
                    "replace committed"
                );
                ReplaceOutcome::Committed(summary)
            }
            Err(source) => {
                let rollback_error = tx.rollback().err();
                self.rolled_back(ReplaceError {
                    stage,
                    source,
                    rollback_error,
                })
            }
        }
    }

    fn apply<W: Warehouse + ?Sized>(
        &self,
        tx: &mut Transaction<'_, W>,
        records: &WindowedSeries,
        symbol: &Symbol,
        stage: &mut ReplaceStage,
    ) -> Result<ReplaceSummary, WarehouseError> {
        tx.execute(&statements::create_table(&self.table), &[])?;
        *stage = ReplaceStage::SchemaEnsured;

        let delete_params = match self.scope {
            DeleteScope::Table => Vec::new(),
            DeleteScope::Symbol => vec![SqlValue::from(symbol.as_str())],
        };
        let rows_deleted = tx.execute(&statements::delete(&self.table, self.scope), &delete_params)?;
        *stage = ReplaceStage::Truncated;
        tracing::debug!(rows_deleted, scope = %self.scope, "deleted current extent");

        let insert = statements::insert(&self.table);
        for (index, record) in records.iter().enumerate() {
            *stage = ReplaceStage::Inserting(index);
            tx.execute(&insert, &row_params(symbol, record)?)?;
        }

        *stage = ReplaceStage::Committing;
        tx.commit()?;

        Ok(ReplaceSummary {
            symbol: symbol.clone(),
            table: self.table.clone(),
            rows_deleted,
            rows_inserted: records.len(),
        })
    }

    fn rolled_back(&self, error: ReplaceError) -> ReplaceOutcome {
        tracing::error!(
            table = %self.table,
            stage = %error.stage,
            error = %error.source,
            "replace rolled back"
        );
        if let Some(rollback_error) = &error.rollback_error {
            tracing::error!(error = %rollback_error, "rollback failed");
        }
        ReplaceOutcome::RolledBack(error)
    }
}

fn row_params(symbol: &Symbol, record: &DailyRecord) -> Result<Vec<SqlValue>, WarehouseError> {
    let volume = i64::try_from(record.volume()).map_err(|_| WarehouseError::Conversion {
        field: "volume",
        value: record.volume().to_string(),
    })?;

    Ok(vec![
        SqlValue::from(symbol.as_str()),
        SqlValue::from(record.date().and_time(NaiveTime::MIN)),
        SqlValue::from(price("open", record.open())?),
        SqlValue::from(price("high", record.high())?),
        SqlValue::from(price("low", record.low())?),
        SqlValue::from(price("close", record.close())?),
        SqlValue::from(volume),
    ])
}

fn price(field: &'static str, value: Decimal) -> Result<f64, WarehouseError> {
    value.to_f64().ok_or_else(|| WarehouseError::Conversion {
        field,
        value: value.to_string(),
    })
}
