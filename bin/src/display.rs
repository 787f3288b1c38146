//! Display utilities and output formatting for the stockload CLI.

use anyhow::Result;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use stockload_lib::prelude::*;

/// Output format for windowed series.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

/// Creates the stage spinner, hidden in quiet mode.
pub(crate) fn spinner(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Formats an optional value, or `N/A`.
pub(crate) fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".into(), |v| v.to_string())
}

/// Prints the outcome of a successful run.
pub(crate) fn print_report(report: &RunReport) {
    println!("Symbol:   {}", report.symbol);
    println!("Table:    {}", report.table);
    println!("Windowed: {} records", report.records_windowed);
    println!("Deleted:  {} rows", report.rows_deleted);
    println!("Inserted: {} rows", report.rows_inserted);
    if let Some((first, last)) = report.date_span {
        println!("Dates:    {first} to {last}");
    }
    if let Some(id) = report.run_id {
        println!("Run:      {id}");
    }
}

/// Prints one run record in detail.
pub(crate) fn print_run(run: &RunRecord) {
    println!("Run: {}", run.id);
    println!("Symbol: {}", run.symbol);
    println!("Table: {}", run.table);
    println!("Status: {}", run.status);
    println!("Created: {}", run.created_at.format("%Y-%m-%d %H:%M:%S"));
    if let Some(started) = run.started_at {
        println!("Started: {}", started.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(completed) = run.completed_at {
        println!("Completed: {}", completed.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(duration) = run.duration() {
        println!("Duration: {:.3}s", duration.num_milliseconds() as f64 / 1000.0);
    }
    println!("PID: {}", or_na(run.pid));
    println!("Windowed: {}", or_na(run.records_windowed));
    println!("Deleted: {}", or_na(run.rows_deleted));
    println!("Written: {}", or_na(run.rows_written));
    if let Some(stage) = &run.failed_stage {
        println!("Failed while: {stage}");
    }
    if let Some(error) = &run.error_message {
        println!("Error: {error}");
    }
}

/// Prints run records as a table.
pub(crate) fn print_runs(runs: &[RunRecord]) {
    println!(
        "{:<36} {:<10} {:<10} {:>8} {:<20}",
        "RUN ID", "SYMBOL", "STATUS", "ROWS", "CREATED"
    );
    println!("{}", "-".repeat(88));

    for run in runs {
        println!(
            "{:<36} {:<10} {:<10} {:>8} {:<20}",
            run.id,
            run.symbol,
            run.status,
            or_na(run.rows_written),
            run.created_at.format("%Y-%m-%d %H:%M"),
        );
    }

    println!("\nTotal: {} runs", runs.len());
}
