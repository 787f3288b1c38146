//! The fetch, window, replace pipeline.

use chrono::NaiveDate;
use stockload_fetch::{FetchClient, FetchError, SeriesSource};
use stockload_runs::{RunId, RunRecord, StateManager};
use stockload_types::{PipelineConfig, Symbol, TableName, WindowedSeries};
use stockload_warehouse::{ReplaceSummary, Replacer, Warehouse};
use stockload_window::Windower;

use crate::Result;

/// Stage a run is entering, reported to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Requesting the series upstream.
    Fetching,
    /// Parsing and truncating the series.
    Windowing,
    /// Replacing the table contents.
    Loading,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetching => write!(f, "fetching"),
            Self::Windowing => write!(f, "windowing"),
            Self::Loading => write!(f, "loading"),
        }
    }
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Run history id, when runs are recorded.
    pub run_id: Option<RunId>,
    /// Symbol refreshed.
    pub symbol: Symbol,
    /// Table refreshed.
    pub table: TableName,
    /// Records kept by the windower.
    pub records_windowed: usize,
    /// Rows deleted before the insert.
    pub rows_deleted: usize,
    /// Rows inserted.
    pub rows_inserted: usize,
    /// Oldest and newest day loaded.
    pub date_span: Option<(NaiveDate, NaiveDate)>,
}

impl RunReport {
    fn new(run_id: Option<RunId>, series: &WindowedSeries, summary: ReplaceSummary) -> Self {
        Self {
            run_id,
            symbol: summary.symbol,
            table: summary.table,
            records_windowed: series.len(),
            rows_deleted: summary.rows_deleted,
            rows_inserted: summary.rows_inserted,
            date_span: series.date_span(),
        }
    }
}

/// Runs fetch, window and replace for one symbol at a time.
///
/// With a [`StateManager`] attached, each run takes the symbol's lock and is
/// recorded in run history.
#[derive(Debug)]
pub struct Pipeline<S> {
    source: S,
    windower: Windower,
    replacer: Replacer,
    state: Option<StateManager>,
}

impl Pipeline<FetchClient> {
    /// Creates a pipeline fetching from the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        let client = FetchClient::from_pipeline(config).map_err(FetchError::Http)?;
        Ok(Self::new(client, config))
    }
}

impl<S: SeriesSource> Pipeline<S> {
    /// Creates a pipeline reading from `source`.
    #[must_use]
    pub fn new(source: S, config: &PipelineConfig) -> Self {
        Self {
            source,
            windower: Windower::new(config.window_size, config.window_order),
            replacer: Replacer::from_config(config),
            state: None,
        }
    }

    /// Records runs and takes per-symbol locks through `state`.
    #[must_use]
    pub fn with_state(mut self, state: StateManager) -> Self {
        self.state = Some(state);
        self
    }

    /// Returns the series source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the attached state manager.
    #[must_use]
    pub const fn state(&self) -> Option<&StateManager> {
        self.state.as_ref()
    }

    /// Fetches and windows the series without touching any warehouse.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the payload is malformed.
    pub async fn window(&self, symbol: &Symbol) -> Result<WindowedSeries> {
        let raw = self.source.fetch(symbol).await?;
        Ok(self.windower.window(&raw)?)
    }

    /// Runs the pipeline for `symbol` into `warehouse`.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage. A failed load is rolled back.
    /// Once the load has committed the run succeeds, even if its history
    /// entry cannot be written.
    pub async fn run<W: Warehouse + ?Sized>(
        &self,
        symbol: &Symbol,
        warehouse: &mut W,
    ) -> Result<RunReport> {
        self.run_with(symbol, warehouse, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_stage` as each stage begins.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage. A failed load is rolled back.
    /// Once the load has committed the run succeeds, even if its history
    /// entry cannot be written.
    pub async fn run_with<W, F>(
        &self,
        symbol: &Symbol,
        warehouse: &mut W,
        mut on_stage: F,
    ) -> Result<RunReport>
    where
        W: Warehouse + ?Sized,
        F: FnMut(PipelineStage),
    {
        let Some(state) = &self.state else {
            return self.execute(symbol, warehouse, &mut on_stage, None).await;
        };

        let _lock = state.lock(symbol)?;
        let mut record = RunRecord::new(symbol, self.replacer.table().as_str());
        record.mark_started(std::process::id());
        state.save_run(&record)?;

        let result = self
            .execute(symbol, warehouse, &mut on_stage, Some(record.id))
            .await;

        match &result {
            Ok(report) => {
                record.records_windowed = Some(report.records_windowed);
                record.mark_completed(report.rows_deleted, report.rows_inserted);
                // The rows are committed; a lost history entry does not undo them.
                if let Err(save_error) = state.save_run(&record) {
                    tracing::error!(
                        run = %record.id,
                        %symbol,
                        rows = report.rows_inserted,
                        error = %save_error,
                        "committed run could not be recorded"
                    );
                }
            }
            Err(e) => {
                record.mark_failed(e.to_string(), e.replace_stage().map(|s| s.to_string()));
                if let Err(save_error) = state.save_run(&record) {
                    tracing::error!(run = %record.id, error = %save_error, "failed to record run failure");
                }
            }
        }
        result
    }

    async fn execute<W, F>(
        &self,
        symbol: &Symbol,
        warehouse: &mut W,
        on_stage: &mut F,
        run_id: Option<RunId>,
    ) -> Result<RunReport>
    where
        W: Warehouse + ?Sized,
        F: FnMut(PipelineStage),
    {
        on_stage(PipelineStage::Fetching);
        let raw = self.source.fetch(symbol).await?;

        on_stage(PipelineStage::Windowing);
        let series = self.windower.window(&raw)?;
        tracing::info!(%symbol, records = series.len(), "windowed daily series");

        on_stage(PipelineStage::Loading);
        let summary = self
            .replacer
            .replace(warehouse, &series, symbol)
            .into_result()?;

        Ok(RunReport::new(run_id, &series, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StockloadError;
    use serde_json::json;
    use stockload_fetch::StaticSource;
    use stockload_types::RawSeriesResponse;
    use stockload_warehouse::SqliteWarehouse;
    use tempfile::TempDir;

    fn source(days: u32) -> StaticSource {
        let series: serde_json::Map<String, serde_json::Value> = (1..=days)
            .rev()
            .map(|day| {
                (
                    format!("2024-01-{day:02}"),
                    json!({
                        "1. open": "10.5",
                        "2. high": "11.0",
                        "3. low": "10.0",
                        "4. close": "10.8",
                        "5. volume": "1000"
                    }),
                )
            })
            .collect();
        StaticSource::new(RawSeriesResponse::new(
            json!({ "Time Series (Daily)": series }),
        ))
    }

    fn five() -> Symbol {
        Symbol::new("FIVE").unwrap()
    }

    #[tokio::test]
    async fn test_run_reports_stages_in_order() {
        let pipeline = Pipeline::new(source(5), &PipelineConfig::default());
        let mut warehouse = SqliteWarehouse::open_in_memory().unwrap();

        let mut stages = Vec::new();
        let report = pipeline
            .run_with(&five(), &mut warehouse, |stage| stages.push(stage))
            .await
            .unwrap();

        assert_eq!(
            stages,
            [
                PipelineStage::Fetching,
                PipelineStage::Windowing,
                PipelineStage::Loading
            ]
        );
        assert_eq!(report.rows_inserted, 5);
        assert!(report.run_id.is_none());
    }

    #[tokio::test]
    async fn test_window_respects_config() {
        let config = PipelineConfig {
            window_size: stockload_types::WindowSize::new(3).unwrap(),
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(source(10), &config);

        let series = pipeline.window(&five()).await.unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.date_span(),
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
            ))
        );
    }

    #[tokio::test]
    async fn test_shape_error_is_recorded_as_failed_run() {
        let temp_dir = TempDir::new().unwrap();
        let state = StateManager::new(temp_dir.path().to_path_buf()).unwrap();
        let broken = StaticSource::new(RawSeriesResponse::new(json!({
            "Note": "Thank you for using Alpha Vantage!"
        })));
        let pipeline = Pipeline::new(broken, &PipelineConfig::default()).with_state(state);
        let mut warehouse = SqliteWarehouse::open_in_memory().unwrap();

        let error = pipeline.run(&five(), &mut warehouse).await.unwrap_err();
        assert!(matches!(error, StockloadError::Shape(_)));
        assert!(error.to_string().contains("Thank you for using Alpha Vantage!"));

        let runs = pipeline.state().unwrap().list_runs().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].status, stockload_runs::RunStatus::Failed);
        assert!(runs[0].failed_stage.is_none());
        assert!(pipeline.state().unwrap().lock(&five()).is_ok());
    }

    #[test]
    fn test_from_config_requires_credential() {
        let result = Pipeline::from_config(&PipelineConfig::default());
        assert!(matches!(result, Err(StockloadError::Config(_))));
    }
}
