//! Orchestration of the replay verbs.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::instrument;

use crate::core::command::CleanupTarget;
use crate::core::commit::validate_commit;
use crate::io::config::ReplayConfig;
use crate::io::diff::unified_diff;
use crate::io::logs::LogStore;
use crate::io::shell::{ShellRequest, ShellRunner};
use crate::io::worktree::WorktreeManager;
use crate::report::{self, Tag};

/// One interactive session: the loaded configuration plus the components
/// the verbs sequence. Construction creates both roots.
pub struct ReplaySession {
    config: ReplayConfig,
    worktrees: WorktreeManager,
    logs: LogStore,
    runner: ShellRunner,
}

impl ReplaySession {
    pub fn new(config: ReplayConfig, worktrees: WorktreeManager, logs: LogStore) -> Result<Self> {
        worktrees.ensure_root()?;
        logs.ensure_root()?;
        let runner = ShellRunner::new(config.command_timeout_secs.map(Duration::from_secs));
        Ok(Self {
            config,
            worktrees,
            logs,
            runner,
        })
    }

    /// Check out `commit`, build it, run it, and capture the run log.
    #[instrument(skip_all, fields(commit))]
    pub fn reproduce(&self, commit: &str) -> Result<()> {
        validate_commit(commit)?;
        report::line(Tag::Info, format_args!("replaying commit {commit}"));
        let log_path = self.logs.run_log(commit);
        self.build_and_run(commit, &log_path)?;
        report::line(Tag::Done, format_args!("log saved: {}", log_path.display()));
        Ok(())
    }

    /// Build and run two commits sequentially, then diff their captured logs.
    #[instrument(skip_all, fields(left, right))]
    pub fn compare(&self, left: &str, right: &str) -> Result<()> {
        validate_commit(left)?;
        validate_commit(right)?;
        report::line(Tag::Info, format_args!("comparing {left} vs {right}"));
        for commit in [left, right] {
            let log_path = self.logs.compare_log(commit);
            self.build_and_run(commit, &log_path)?;
            report::line(
                Tag::Done,
                format_args!("{commit} log: {}", log_path.display()),
            );
        }
        unified_diff(&self.logs.compare_log(left), &self.logs.compare_log(right))
    }

    /// Remove one checkout, or every checkout for the `all` sentinel.
    ///
    /// Logs are left untouched either way.
    #[instrument(skip_all)]
    pub fn cleanup(&self, target: &CleanupTarget) -> Result<()> {
        match target {
            CleanupTarget::All => self.worktrees.destroy_all(),
            CleanupTarget::Commit(commit) => {
                validate_commit(commit)?;
                self.worktrees.destroy(commit)
            }
        }
    }

    fn build_and_run(&self, commit: &str, log_path: &Path) -> Result<()> {
        let checkout = self.worktrees.prepare(commit)?;
        self.runner.run(&ShellRequest {
            command: self.config.build_command.clone(),
            cwd: Some(checkout.clone()),
            log_path: None,
            tag: Tag::Build,
        })?;
        self.runner.run(&ShellRequest {
            command: self.config.run_command.clone(),
            cwd: Some(checkout),
            log_path: Some(log_path.to_path_buf()),
            tag: Tag::Run,
        })?;
        Ok(())
    }
}
