//! Pipeline configuration from flags, environment and config files.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use stockload_lib::prelude::*;
use stockload_lib::Credential;

/// Flags shared by every command that talks to the API.
#[derive(Args, Debug)]
pub(crate) struct ConfigArgs {
    /// JSON file with a pipeline configuration; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Alpha Vantage API key
    #[arg(long, env = "ALPHAVANTAGE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Target table (e.g., stock_prices, main.stock_prices)
    #[arg(short, long)]
    table: Option<TableName>,

    /// Number of most recent days to keep
    #[arg(short, long)]
    window: Option<usize>,

    /// Window ordering (most-recent, upstream)
    #[arg(long)]
    order: Option<WindowOrder>,

    /// Rows replaced by a run (table, symbol)
    #[arg(long)]
    scope: Option<DeleteScope>,

    /// HTTP timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Replay a saved API response instead of calling the API
    #[arg(long)]
    input: Option<PathBuf>,
}

impl ConfigArgs {
    /// Builds the effective configuration.
    pub(crate) fn load(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                PipelineConfig::from_json(&json)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => PipelineConfig::default(),
        };

        if let Some(key) = &self.api_key {
            config.credential = Credential::new(key.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(table) = &self.table {
            config.table_name = table.clone();
        }
        if let Some(window) = self.window {
            config.window_size = WindowSize::new(window)?;
        }
        if let Some(order) = self.order {
            config.window_order = order;
        }
        if let Some(scope) = self.scope {
            config.delete_scope = scope;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }

        Ok(config)
    }

    /// Returns the saved response to replay, if any.
    pub(crate) fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }
}

/// Loads a saved API response to replay.
pub(crate) fn saved_source(path: &Path) -> Result<StaticSource> {
    StaticSource::from_file(path)
        .with_context(|| format!("Failed to load saved response {}", path.display()))
}

/// Builds a pipeline against the live API.
pub(crate) fn live_pipeline(config: &PipelineConfig) -> Result<Pipeline<FetchClient>> {
    Pipeline::from_config(config)
        .context("Invalid pipeline configuration (is ALPHAVANTAGE_API_KEY set?)")
}
