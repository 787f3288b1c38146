//! Table inspection command.

use anyhow::{Context, Result};
use std::path::Path;
use stockload_lib::prelude::*;

/// Execute the show command.
pub(crate) fn show(symbol: Option<&str>, database: &Path, table: &str, limit: usize) -> Result<()> {
    let table = TableName::new(table)?;
    let symbol = symbol.map(Symbol::new).transpose()?;

    let warehouse = SqliteWarehouse::open(database)
        .with_context(|| format!("Failed to open database {}", database.display()))?;

    if !warehouse.table_exists(&table)? {
        println!("Table {table} does not exist yet.");
        return Ok(());
    }

    let rows = warehouse.rows(&table, symbol.as_ref())?;
    if rows.is_empty() {
        println!("No rows found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<12} {:>12} {:>12} {:>12} {:>12} {:>14}",
        "SYMBOL", "DATE", "OPEN", "HIGH", "LOW", "CLOSE", "VOLUME"
    );
    println!("{}", "-".repeat(90));

    for row in rows.iter().take(limit) {
        println!(
            "{:<10} {:<12} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>14}",
            row.symbol,
            row.date.format("%Y-%m-%d"),
            row.open,
            row.high,
            row.low,
            row.close,
            row.volume,
        );
    }

    if rows.len() > limit {
        println!("... {} more", rows.len() - limit);
    }
    println!("\nTotal: {} rows", rows.len());

    warehouse.close()?;
    Ok(())
}
