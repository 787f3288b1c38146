//! On-disk run history.

use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use stockload_types::Symbol;

use crate::{Result, RunError, RunId, RunRecord, RunStatus, SymbolLock};

/// Stores run records and lock files under one base directory.
///
/// Runs are JSON files in `<base>/runs/`, locks live in `<base>/locks/`.
#[derive(Debug, Clone)]
pub struct StateManager {
    base_path: PathBuf,
    runs_path: PathBuf,
    locks_path: PathBuf,
}

impl StateManager {
    /// Creates a state manager rooted at `base_path`, creating the
    /// subdirectories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn new(base_path: PathBuf) -> Result<Self> {
        let runs_path = base_path.join("runs");
        let locks_path = base_path.join("locks");

        for path in [&base_path, &runs_path, &locks_path] {
            fs::create_dir_all(path).map_err(|e| RunError::CreateDir {
                path: path.clone(),
                source: e,
            })?;
        }

        Ok(Self {
            base_path,
            runs_path,
            locks_path,
        })
    }

    /// Returns the platform data directory for stockload:
    /// - Linux: `~/.local/share/stockload/`
    /// - macOS: `~/Library/Application Support/stockload/`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\stockload\`
    ///
    /// # Errors
    ///
    /// Returns [`RunError::NoDataDir`] if no home directory can be found.
    pub fn default_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "stockload")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(RunError::NoDataDir)
    }

    /// Creates a state manager at the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or created.
    pub fn with_default_path() -> Result<Self> {
        Self::new(Self::default_path()?)
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the directory holding lock files.
    #[must_use]
    pub fn locks_path(&self) -> &Path {
        &self.locks_path
    }

    /// Returns the path of a run's record.
    #[must_use]
    pub fn run_path(&self, id: RunId) -> PathBuf {
        self.runs_path.join(format!("{id}.json"))
    }

    /// Takes the exclusive lock for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Locked`] if another live run holds it.
    pub fn lock(&self, symbol: &Symbol) -> Result<SymbolLock> {
        SymbolLock::acquire(&self.locks_path, symbol)
    }

    /// Writes a run record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    pub fn save_run(&self, run: &RunRecord) -> Result<()> {
        let path = self.run_path(run.id);
        let json = serde_json::to_string_pretty(run)?;

        fs::write(&path, json).map_err(|e| RunError::WriteFile { path, source: e })
    }

    /// Loads a run record.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::RunNotFound`] if no such run exists, or an error
    /// if the file cannot be read or parsed.
    pub fn load_run(&self, id: RunId) -> Result<RunRecord> {
        let path = self.run_path(id);
        if !path.exists() {
            return Err(RunError::RunNotFound(id));
        }

        let content = fs::read_to_string(&path).map_err(|e| RunError::ReadFile {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| RunError::ParseJson { path, source: e })
    }

    /// Lists all runs, newest first. Unparsable files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the runs directory cannot be read.
    pub fn list_runs(&self) -> Result<Vec<RunRecord>> {
        let read_dir_error = |e| RunError::ReadDir {
            path: self.runs_path.clone(),
            source: e,
        };

        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.runs_path).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let content = fs::read_to_string(&path).map_err(|e| RunError::ReadFile {
                path: path.clone(),
                source: e,
            })?;
            match serde_json::from_str::<RunRecord>(&content) {
                Ok(run) => runs.push(run),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable run file"),
            }
        }

        runs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(runs)
    }

    /// Lists the runs of one symbol, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if runs cannot be listed.
    pub fn runs_for(&self, symbol: &Symbol) -> Result<Vec<RunRecord>> {
        let mut runs = self.list_runs()?;
        runs.retain(|run| run.symbol == symbol.as_str());
        Ok(runs)
    }

    /// Deletes a run record.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::RunNotFound`] if no such run exists, or an error
    /// if the file cannot be removed.
    pub fn delete_run(&self, id: RunId) -> Result<()> {
        let path = self.run_path(id);
        if !path.exists() {
            return Err(RunError::RunNotFound(id));
        }
        fs::remove_file(&path).map_err(|e| RunError::DeleteFile { path, source: e })
    }

    /// Deletes every finished run, returning the removed ids.
    ///
    /// # Errors
    ///
    /// Returns an error if runs cannot be listed or removed.
    pub fn clean(&self) -> Result<Vec<RunId>> {
        let mut removed = Vec::new();
        for run in self.list_runs()? {
            if run.is_finished() {
                self.delete_run(run.id)?;
                removed.push(run.id);
            }
        }
        Ok(removed)
    }

    /// Marks running runs whose process has died as failed.
    ///
    /// # Errors
    ///
    /// Returns an error if runs cannot be listed or updated.
    pub fn cleanup_stale_runs(&self) -> Result<Vec<RunId>> {
        let mut cleaned = Vec::new();
        for mut run in self.list_runs()? {
            if run.status != RunStatus::Running {
                continue;
            }
            if run.pid.is_none_or(|pid| !is_process_running(pid)) {
                run.mark_failed("Process died before the run finished", None);
                self.save_run(&run)?;
                cleaned.push(run.id);
            }
        }
        Ok(cleaned)
    }
}

/// Checks if a process with the given PID is still running.
#[must_use]
pub fn is_process_running(pid: u32) -> bool {
    if pid == std::process::id() {
        return true;
    }

    #[cfg(unix)]
    {
        use std::process::Command;
        // Signal 0 only checks that the process exists.
        Command::new("kill")
            .args(["-0", &pid.to_string()])
            .output()
            .is_ok_and(|output| output.status.success())
    }

    #[cfg(windows)]
    {
        use std::process::Command;
        Command::new("tasklist")
            .args(["/FI", &format!("PID eq {pid}")])
            .output()
            .is_ok_and(|output| String::from_utf8_lossy(&output.stdout).contains(&pid.to_string()))
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}
