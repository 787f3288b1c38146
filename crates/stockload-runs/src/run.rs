//! Run records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockload_types::Symbol;
use uuid::Uuid;

/// Unique identifier for a pipeline run.
pub type RunId = Uuid;

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Recorded but not yet started.
    #[default]
    Pending,
    /// Fetching, windowing or loading.
    Running,
    /// The replace committed.
    Completed,
    /// A stage failed; the target table was left unchanged.
    Failed,
}

impl RunStatus {
    /// Returns true if the run is in a terminal state.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns the status as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One pipeline run for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique identifier for this run.
    pub id: RunId,
    /// Symbol being refreshed.
    pub symbol: String,
    /// Target table.
    pub table: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the run started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the run finished, successfully or not.
    pub completed_at: Option<DateTime<Utc>>,
    /// Current status.
    pub status: RunStatus,
    /// Process running the pipeline.
    pub pid: Option<u32>,
    /// Records kept by the windower.
    pub records_windowed: Option<usize>,
    /// Rows removed from the target table.
    pub rows_deleted: Option<usize>,
    /// Rows written to the target table.
    pub rows_written: Option<usize>,
    /// Error message if the run failed.
    pub error_message: Option<String>,
    /// Replace stage reached when a load failed.
    pub failed_stage: Option<String>,
}

impl RunRecord {
    /// Creates a pending run for `symbol` into `table`.
    #[must_use]
    pub fn new(symbol: &Symbol, table: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            table: table.into(),
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            status: RunStatus::Pending,
            pid: None,
            records_windowed: None,
            rows_deleted: None,
            rows_written: None,
            error_message: None,
            failed_stage: None,
        }
    }

    /// Returns true if the run is in a terminal state.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Returns how long the run took, once finished.
    #[must_use]
    pub fn duration(&self) -> Option<chrono::Duration> {
        Some(self.completed_at? - self.started_at?)
    }

    /// Marks the run as started by process `pid`.
    pub fn mark_started(&mut self, pid: u32) {
        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());
        self.pid = Some(pid);
    }

    /// Marks the run as completed.
    pub fn mark_completed(&mut self, rows_deleted: usize, rows_written: usize) {
        self.status = RunStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.rows_deleted = Some(rows_deleted);
        self.rows_written = Some(rows_written);
    }

    /// Marks the run as failed, recording the replace stage if the load failed.
    pub fn mark_failed(&mut self, error: impl Into<String>, stage: Option<String>) {
        self.status = RunStatus::Failed;
        self.completed_at = Some(Utc::now());
        self.error_message = Some(error.into());
        self.failed_stage = stage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RunRecord {
        RunRecord::new(&Symbol::new("FIVE").unwrap(), "stock_prices")
    }

    #[test]
    fn test_run_status_is_finished() {
        assert!(!RunStatus::Pending.is_finished());
        assert!(!RunStatus::Running.is_finished());
        assert!(RunStatus::Completed.is_finished());
        assert!(RunStatus::Failed.is_finished());
    }

    #[test]
    fn test_run_lifecycle() {
        let mut run = record();
        assert_eq!(run.status, RunStatus::Pending);
        assert!(run.duration().is_none());

        run.mark_started(4242);
        assert_eq!(run.status, RunStatus::Running);
        assert_eq!(run.pid, Some(4242));
        assert!(!run.is_finished());

        run.mark_completed(90, 90);
        assert!(run.is_finished());
        assert_eq!(run.rows_written, Some(90));
        assert!(run.duration().is_some());
    }

    #[test]
    fn test_run_failure_keeps_stage() {
        let mut run = record();
        run.mark_started(1);
        run.mark_failed("disk full", Some("inserting record 3".to_string()));

        assert_eq!(run.status, RunStatus::Failed);
        assert_eq!(run.error_message.as_deref(), Some("disk full"));
        assert_eq!(run.failed_stage.as_deref(), Some("inserting record 3"));
        assert!(run.rows_written.is_none());
    }

    #[test]
    fn test_run_status_serialization() {
        let json = serde_json::to_string(&RunStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
