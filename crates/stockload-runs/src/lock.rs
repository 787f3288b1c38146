//! Exclusive per-symbol run locks.

use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use stockload_types::Symbol;

use crate::{Result, RunError};

/// Exclusive lock on one symbol, held for the duration of a run.
///
/// The lock is an OS advisory lock on `<locks>/<SYMBOL>.lock`. The holder
/// writes its PID into the file so a refused contender can name the owner.
/// The OS releases the lock when the handle closes, including when the
/// owning process dies, so a leftover file never blocks a later run. The file
/// itself stays in place and is emptied when the lock drops.
#[derive(Debug)]
pub struct SymbolLock {
    file: File,
    path: PathBuf,
    symbol: Symbol,
}

impl SymbolLock {
    /// Takes the lock for `symbol` inside `locks_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Locked`] if another handle holds the lock, or an
    /// I/O error if the lock file cannot be opened or written.
    pub fn acquire(locks_dir: &Path, symbol: &Symbol) -> Result<Self> {
        let path = locks_dir.join(format!("{symbol}.lock"));
        let write_error = |source| RunError::WriteFile {
            path: path.clone(),
            source,
        };

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(write_error)?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                let pid = fs::read_to_string(&path)
                    .ok()
                    .and_then(|content| content.trim().parse().ok());
                return Err(RunError::Locked {
                    symbol: symbol.to_string(),
                    path: path.clone(),
                    pid,
                });
            }
            Err(TryLockError::Error(e)) => return Err(write_error(e)),
        }

        let mut lock = Self {
            file,
            path: path.clone(),
            symbol: symbol.clone(),
        };
        lock.write_owner(std::process::id()).map_err(write_error)?;

        tracing::debug!(%symbol, path = %path.display(), "acquired run lock");
        Ok(lock)
    }

    fn write_owner(&mut self, pid: u32) -> std::io::Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        write!(self.file, "{pid}")?;
        self.file.flush()
    }

    /// Returns the locked symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the lock file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SymbolLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.set_len(0) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to clear run lock");
        }
        if let Err(e) = self.file.unlock() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release run lock");
        }
    }
}
