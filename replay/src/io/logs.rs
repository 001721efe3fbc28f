//! Deterministic log paths under the logs root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Owns log file naming under a single root directory.
///
/// Reproduce runs and comparison runs of the same commit get distinct names
/// so they never collide. Captured output truncates whatever was there
/// before; logs survive worktree cleanup.
#[derive(Debug, Clone)]
pub struct LogStore {
    root: PathBuf,
}

impl LogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the logs root if missing.
    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("create logs directory {}", self.root.display()))
    }

    /// Log path for a plain reproduce run: `<root>/<commit>.log`.
    pub fn run_log(&self, commit: &str) -> PathBuf {
        self.root.join(format!("{commit}.log"))
    }

    /// Log path for one leg of a comparison: `<root>/compare_<commit>.log`.
    pub fn compare_log(&self, commit: &str) -> PathBuf {
        self.root.join(format!("compare_{commit}.log"))
    }
}
