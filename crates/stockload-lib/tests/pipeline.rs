//! End-to-end runs of the pipeline against SQLite.

use approx::assert_relative_eq;
use chrono::{Days, NaiveDate};
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::path::PathBuf;
use stockload_lib::prelude::*;
use stockload_lib::{ReplaceStage, RunError, SqlValue, WarehouseError};
use tempfile::TempDir;

const DAYS: u64 = 120;

/// A `TIME_SERIES_DAILY` payload for FIVE with `DAYS` consecutive days,
/// newest first, ending 2024-04-29.
fn fixture() -> RawSeriesResponse {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut series = Map::new();
    for offset in (0..DAYS).rev() {
        let date = start.checked_add_days(Days::new(offset)).unwrap();
        let close = format!("{}.2500", 100 + offset);
        series.insert(
            date.format("%Y-%m-%d").to_string(),
            json!({
                "1. open": "100.0000",
                "2. high": "250.5000",
                "3. low": "99.5000",
                "4. close": close,
                "5. volume": (1_000_000 + offset).to_string(),
            }),
        );
    }

    RawSeriesResponse::new(json!({
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "FIVE",
            "3. Last Refreshed": "2024-04-29",
            "4. Output Size": "Compact",
            "5. Time Zone": "US/Eastern"
        },
        "Time Series (Daily)": Value::Object(series),
    }))
}

fn five() -> Symbol {
    Symbol::new("FIVE").unwrap()
}

fn pipeline() -> Pipeline<StaticSource> {
    Pipeline::new(StaticSource::new(fixture()), &PipelineConfig::default())
}

/// Delegates to SQLite but fails the insert with the given ordinal.
struct FailingWarehouse<'a> {
    inner: &'a mut SqliteWarehouse,
    fail_at_insert: usize,
    inserts: usize,
}

impl Warehouse for FailingWarehouse<'_> {
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize, WarehouseError> {
        if sql.starts_with("INSERT") {
            if self.inserts == self.fail_at_insert {
                return Err(WarehouseError::Backend("connection reset".to_string()));
            }
            self.inserts += 1;
        }
        self.inner.execute(sql, params)
    }

    fn begin(&mut self) -> Result<(), WarehouseError> {
        self.inner.begin()
    }

    fn commit(&mut self) -> Result<(), WarehouseError> {
        self.inner.commit()
    }

    fn rollback(&mut self) -> Result<(), WarehouseError> {
        self.inner.rollback()
    }
}

/// Delegates to SQLite and wipes the run history directory once the
/// transaction commits.
struct HistoryLosingWarehouse<'a> {
    inner: &'a mut SqliteWarehouse,
    runs_dir: PathBuf,
}

impl Warehouse for HistoryLosingWarehouse<'_> {
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize, WarehouseError> {
        self.inner.execute(sql, params)
    }

    fn begin(&mut self) -> Result<(), WarehouseError> {
        self.inner.begin()
    }

    fn commit(&mut self) -> Result<(), WarehouseError> {
        self.inner.commit()?;
        std::fs::remove_dir_all(&self.runs_dir).unwrap();
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), WarehouseError> {
        self.inner.rollback()
    }
}

#[tokio::test]
async fn test_end_to_end_loads_ninety_most_recent_days() {
    let mut warehouse = SqliteWarehouse::open_in_memory().unwrap();

    let report = pipeline().run(&five(), &mut warehouse).await.unwrap();
    assert_eq!(report.records_windowed, 90);
    assert_eq!(report.rows_inserted, 90);
    assert_eq!(
        report.date_span,
        Some((
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 29).unwrap()
        ))
    );

    let rows = warehouse.rows(&TableName::default(), None).unwrap();
    assert_eq!(rows.len(), 90);
    assert!(rows.iter().all(|row| row.symbol == "FIVE"));

    let keys: HashSet<_> = rows.iter().map(|row| (row.symbol.clone(), row.date)).collect();
    assert_eq!(keys.len(), 90);

    let newest = &rows[0];
    assert_eq!(newest.date.date(), NaiveDate::from_ymd_opt(2024, 4, 29).unwrap());
    assert_relative_eq!(newest.close, 219.25);
    assert_relative_eq!(newest.high, 250.5);
    assert_eq!(newest.volume, 1_000_119);
}

#[tokio::test]
async fn test_second_run_leaves_table_unchanged() {
    let mut warehouse = SqliteWarehouse::open_in_memory().unwrap();
    let pipeline = pipeline();

    pipeline.run(&five(), &mut warehouse).await.unwrap();
    let first = warehouse.rows(&TableName::default(), None).unwrap();

    let report = pipeline.run(&five(), &mut warehouse).await.unwrap();
    let second = warehouse.rows(&TableName::default(), None).unwrap();

    assert_eq!(report.rows_deleted, 90);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_failed_load_leaves_table_unchanged() {
    let mut warehouse = SqliteWarehouse::open_in_memory().unwrap();
    let seed = Pipeline::new(
        StaticSource::new(fixture()),
        &PipelineConfig {
            window_size: WindowSize::new(10).unwrap(),
            ..PipelineConfig::default()
        },
    );
    seed.run(&Symbol::new("IBM").unwrap(), &mut warehouse)
        .await
        .unwrap();
    let before = warehouse.rows(&TableName::default(), None).unwrap();

    let mut failing = FailingWarehouse {
        inner: &mut warehouse,
        fail_at_insert: 45,
        inserts: 0,
    };
    let error = pipeline().run(&five(), &mut failing).await.unwrap_err();

    assert_eq!(error.replace_stage(), Some(ReplaceStage::Inserting(45)));
    assert_eq!(warehouse.rows(&TableName::default(), None).unwrap(), before);
}

#[tokio::test]
async fn test_runs_are_recorded_and_serialized_per_symbol() {
    let temp_dir = TempDir::new().unwrap();
    let state = StateManager::new(temp_dir.path().to_path_buf()).unwrap();
    let pipeline = pipeline().with_state(state.clone());
    let mut warehouse = SqliteWarehouse::open_in_memory().unwrap();

    let report = pipeline.run(&five(), &mut warehouse).await.unwrap();
    let run = state.load_run(report.run_id.unwrap()).unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.rows_written, Some(90));
    assert_eq!(run.records_windowed, Some(90));

    let _held = state.lock(&five()).unwrap();
    let error = pipeline.run(&five(), &mut warehouse).await.unwrap_err();
    assert!(matches!(error, StockloadError::Run(RunError::Locked { .. })));
    assert_eq!(state.list_runs().unwrap().len(), 1);
}

#[tokio::test]
async fn test_symbol_scope_keeps_other_symbols() {
    let config = PipelineConfig {
        delete_scope: DeleteScope::Symbol,
        table_name: TableName::new("main.stock_prices").unwrap(),
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(StaticSource::new(fixture()), &config);
    let mut warehouse = SqliteWarehouse::open_in_memory().unwrap();

    pipeline
        .run(&Symbol::new("IBM").unwrap(), &mut warehouse)
        .await
        .unwrap();
    pipeline.run(&five(), &mut warehouse).await.unwrap();

    assert_eq!(warehouse.count_rows(&config.table_name, None).unwrap(), 180);
}

#[tokio::test]
async fn test_committed_run_succeeds_when_history_write_fails() {
    let temp_dir = TempDir::new().unwrap();
    let state = StateManager::new(temp_dir.path().to_path_buf()).unwrap();
    let pipeline = pipeline().with_state(state);
    let mut warehouse = SqliteWarehouse::open_in_memory().unwrap();

    let mut losing = HistoryLosingWarehouse {
        inner: &mut warehouse,
        runs_dir: temp_dir.path().join("runs"),
    };
    let report = pipeline.run(&five(), &mut losing).await.unwrap();

    assert_eq!(report.rows_inserted, 90);
    assert_eq!(warehouse.count_rows(&TableName::default(), None).unwrap(), 90);
    assert!(pipeline.state().unwrap().lock(&five()).is_ok());
}
