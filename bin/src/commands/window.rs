//! Dry-run window command.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use stockload_lib::prelude::*;
use stockload_lib::write_series;

use crate::config::{ConfigArgs, live_pipeline, saved_source};
use crate::display::Format;

/// Execute the window command.
pub(crate) async fn window(
    symbol: &str,
    output: Option<&Path>,
    format: Format,
    args: &ConfigArgs,
) -> Result<()> {
    let symbol = Symbol::new(symbol)?;
    let config = args.load()?;

    let series = match args.input() {
        Some(path) => {
            Pipeline::new(saved_source(path)?, &config)
                .window(&symbol)
                .await
        }
        None => live_pipeline(&config)?.window(&symbol).await,
    }
    .with_context(|| format!("Failed to window {symbol}"))?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_series(format.into(), &symbol, &series, &mut writer)?;
            writer.flush()?;
            tracing::info!(path = %path.display(), records = series.len(), "wrote window");
        }
        None => {
            let mut writer = BufWriter::new(std::io::stdout());
            write_series(format.into(), &symbol, &series, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}
