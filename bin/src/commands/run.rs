//! Full pipeline run command.

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::path::Path;
use stockload_lib::prelude::*;

use crate::config::{ConfigArgs, live_pipeline, saved_source};
use crate::display::{print_report, spinner};

/// Execute the run command.
pub(crate) async fn run(
    symbol: &str,
    database: &Path,
    args: &ConfigArgs,
    state_dir: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let symbol = Symbol::new(symbol)?;
    let config = args.load()?;

    let state = match state_dir {
        Some(dir) => StateManager::new(dir.to_path_buf()),
        None => StateManager::with_default_path(),
    }
    .context("Failed to initialize state manager")?;

    let mut warehouse = SqliteWarehouse::open(database)
        .with_context(|| format!("Failed to open database {}", database.display()))?;
    let progress = spinner(quiet)?;

    let result = match args.input() {
        Some(path) => {
            let pipeline = Pipeline::new(saved_source(path)?, &config).with_state(state);
            execute(&pipeline, &symbol, &mut warehouse, &progress).await
        }
        None => {
            let pipeline = live_pipeline(&config)?.with_state(state);
            execute(&pipeline, &symbol, &mut warehouse, &progress).await
        }
    };

    let closed = warehouse.close();
    match &result {
        Ok(report) => progress.finish_with_message(format!(
            "Loaded {} rows for {symbol} into {}",
            report.rows_inserted, report.table
        )),
        Err(_) => progress.abandon_with_message(format!("Run for {symbol} failed; table unchanged")),
    }

    let report = result.with_context(|| format!("Run for {symbol} failed"))?;
    closed.context("Failed to close database")?;

    if !quiet {
        print_report(&report);
    }
    Ok(())
}

async fn execute<S: SeriesSource>(
    pipeline: &Pipeline<S>,
    symbol: &Symbol,
    warehouse: &mut SqliteWarehouse,
    progress: &ProgressBar,
) -> Result<RunReport, StockloadError> {
    pipeline
        .run_with(symbol, warehouse, |stage| {
            progress.set_message(format!("{stage} {symbol}"));
        })
        .await
}
