//! Run history command.

use anyhow::{Context, Result};
use std::path::Path;
use stockload_lib::prelude::*;

use crate::display::{print_run, print_runs};

/// Execute the runs command.
pub(crate) fn runs(
    run_id: Option<&str>,
    symbol: Option<&str>,
    clean: bool,
    state_dir: Option<&Path>,
) -> Result<()> {
    let state = match state_dir {
        Some(dir) => StateManager::new(dir.to_path_buf()),
        None => StateManager::with_default_path(),
    }
    .context("Failed to initialize state manager")?;

    let stale = state.cleanup_stale_runs()?;
    if !stale.is_empty() {
        tracing::warn!(count = stale.len(), "marked runs of dead processes as failed");
    }

    if clean {
        let removed = state.clean()?;
        println!("Removed {} finished runs.", removed.len());
        return Ok(());
    }

    if let Some(id) = run_id {
        let id = id.parse().context("Invalid run ID format")?;
        let run = state.load_run(id).context("Run not found")?;
        print_run(&run);
        return Ok(());
    }

    let runs = match symbol {
        Some(symbol) => state.runs_for(&Symbol::new(symbol)?)?,
        None => state.list_runs()?,
    };

    if runs.is_empty() {
        println!("No runs found.");
        return Ok(());
    }

    print_runs(&runs);
    Ok(())
}
