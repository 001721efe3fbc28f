//! Test-only helpers: a throwaway git repository with seeded commits.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::io::config::{ReplayConfig, write_config};

/// A temporary git repository plus worktrees/logs roots beside it.
///
/// Layout under one temp directory: `repo/` (the repository), `worktrees/`
/// and `logs/` (created on first use by the session), and optionally
/// `config.json`. Everything is deleted on drop.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a repository with an initial commit.
    pub fn init() -> Result<Self> {
        let dir = TempDir::new().context("create temp dir")?;
        let repo = Self { dir };
        fs::create_dir(repo.repo_dir()).context("create repo dir")?;
        repo.git(&["init"])?;
        repo.git(&["config", "user.email", "test@example.com"])?;
        repo.git(&["config", "user.name", "test"])?;
        repo.commit_file("README.md", "hi\n", "chore: init")?;
        Ok(repo)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn repo_dir(&self) -> PathBuf {
        self.dir.path().join("repo")
    }

    pub fn worktrees_root(&self) -> PathBuf {
        self.dir.path().join("worktrees")
    }

    pub fn logs_root(&self) -> PathBuf {
        self.dir.path().join("logs")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    /// Write `contents` to `name`, commit it, and return the new head id.
    pub fn commit_file(&self, name: &str, contents: &str, message: &str) -> Result<String> {
        fs::write(self.repo_dir().join(name), contents)
            .with_context(|| format!("write {name}"))?;
        self.git(&["add", name])?;
        self.git(&["commit", "-m", message])?;
        self.head()
    }

    /// Current head commit id (full hash).
    pub fn head(&self) -> Result<String> {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(self.repo_dir())
            .output()
            .context("spawn git rev-parse")?;
        if !output.status.success() {
            return Err(anyhow!(
                "git rev-parse failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Write a config file beside the repository and return its path.
    pub fn write_config(&self, config: &ReplayConfig) -> Result<PathBuf> {
        let path = self.config_path();
        write_config(&path, config)?;
        Ok(path)
    }

    fn git(&self, args: &[&str]) -> Result<()> {
        let status = Command::new("git")
            .args(args)
            .current_dir(self.repo_dir())
            .status()
            .with_context(|| format!("spawn git {}", args.join(" ")))?;
        if !status.success() {
            return Err(anyhow!("git {} failed", args.join(" ")));
        }
        Ok(())
    }
}
