//! Per-commit checkout lifecycle under the worktrees root.
//!
//! The manager exclusively owns the commit → directory mapping. Checkouts
//! are real `git worktree` entries of the replayed repository, one directory
//! per commit identifier; callers validate identifiers before they get here.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument, warn};

use crate::report::{self, Tag};

/// Manages checkout directories for one repository.
#[derive(Debug, Clone)]
pub struct WorktreeManager {
    repo_dir: PathBuf,
    root: PathBuf,
}

impl WorktreeManager {
    pub fn new(repo_dir: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the worktrees root if missing.
    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("create worktrees directory {}", self.root.display()))
    }

    /// Deterministic checkout directory for a commit.
    pub fn checkout_dir(&self, commit: &str) -> PathBuf {
        self.root.join(commit)
    }

    /// Return the checkout for `commit`, creating it on first reference.
    ///
    /// An existing directory is reused as-is; no attempt is made to verify
    /// or refresh its contents. A failed `git worktree add` surfaces as an
    /// error with git's stderr; nothing is rolled back.
    #[instrument(skip_all, fields(commit))]
    pub fn prepare(&self, commit: &str) -> Result<PathBuf> {
        let dir = self.checkout_dir(commit);
        if dir.exists() {
            report::line(
                Tag::Info,
                format_args!("worktree {} already exists, reusing", dir.display()),
            );
            debug!(dir = %dir.display(), "reusing checkout");
            return Ok(dir);
        }

        report::line(
            Tag::Info,
            format_args!("creating worktree: {}", dir.display()),
        );
        let dir_arg = dir.to_string_lossy();
        self.git_checked(Tag::Info, &["worktree", "add", &dir_arg, commit])?;
        Ok(dir)
    }

    /// Remove the checkout for `commit` if it exists.
    ///
    /// A missing checkout is a skip notice, not an error.
    #[instrument(skip_all, fields(commit))]
    pub fn destroy(&self, commit: &str) -> Result<()> {
        let dir = self.checkout_dir(commit);
        if !dir.exists() {
            report::line(
                Tag::Info,
                format_args!("worktree {} not found, skipping removal", dir.display()),
            );
            return Ok(());
        }
        report::line(
            Tag::Info,
            format_args!("removing worktree: {}", dir.display()),
        );
        self.remove_dir(&dir)
    }

    /// Force-remove every checkout directory under the root.
    ///
    /// Keeps sweeping past per-directory failures so one stuck checkout does
    /// not strand the rest.
    #[instrument(skip_all)]
    pub fn destroy_all(&self) -> Result<()> {
        report::line(Tag::Info, "removing all worktrees");
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("read worktrees directory {}", self.root.display()))?;
        for entry in entries {
            let entry =
                entry.with_context(|| format!("read entry under {}", self.root.display()))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if let Err(err) = self.remove_dir(&path) {
                warn!(dir = %path.display(), "worktree removal failed: {err:#}");
                report::line(
                    Tag::Error,
                    format_args!("failed to remove {}: {err:#}", path.display()),
                );
            }
        }
        report::line(Tag::Done, "all worktrees removed");
        Ok(())
    }

    /// `git worktree remove --force`, falling back to a plain directory
    /// delete when git refuses or leaves the directory behind.
    fn remove_dir(&self, dir: &Path) -> Result<()> {
        let dir_arg = dir.to_string_lossy();
        let removed = self.git(Tag::Cleanup, &["worktree", "remove", &dir_arg, "--force"])?;
        if !removed.status.success() {
            debug!(
                dir = %dir.display(),
                "git worktree remove failed: {}",
                String::from_utf8_lossy(&removed.stderr).trim()
            );
        }
        if !dir.exists() {
            return Ok(());
        }

        // Unregistered or stuck entries: delete the tree, then prune the
        // stale registration so the same commit can be added again.
        fs::remove_dir_all(dir).with_context(|| format!("remove directory {}", dir.display()))?;
        let pruned = self.git(Tag::Cleanup, &["worktree", "prune", "--expire", "now"])?;
        if !pruned.status.success() {
            debug!(
                "git worktree prune failed: {}",
                String::from_utf8_lossy(&pruned.stderr).trim()
            );
        }
        Ok(())
    }

    fn git_checked(&self, tag: Tag, args: &[&str]) -> Result<Output> {
        let output = self.git(tag, args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }
        Ok(output)
    }

    fn git(&self, tag: Tag, args: &[&str]) -> Result<Output> {
        report::line(
            tag,
            format_args!("git {} (cwd={})", args.join(" "), self.repo_dir.display()),
        );
        debug!(args = %args.join(" "), "running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}
