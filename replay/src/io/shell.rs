//! Shell-string command execution.
//!
//! Configured build/run commands are raw shell lines, so everything that
//! interprets them funnels through one place: this module owns the `sh -c`
//! contract, the capture-to-file redirection, and the exit-status policy.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::report::{self, Tag};

/// Per-invocation data for one shell command.
#[derive(Debug, Clone)]
pub struct ShellRequest {
    /// Raw shell command line, run via `sh -c`.
    pub command: String,
    /// Working directory; the process's own when unset.
    pub cwd: Option<PathBuf>,
    /// Capture combined stdout+stderr here, truncating any prior content.
    /// When unset the streams inherit the terminal.
    pub log_path: Option<PathBuf>,
    /// Tag for the diagnostic line announcing the command.
    pub tag: Tag,
}

/// Process-wide execution policy for configured commands.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    /// Kill the child when it outlives this. Unset means wait forever.
    timeout: Option<Duration>,
    /// Absorb non-zero child exits instead of turning them into errors.
    ignore_exit_status: bool,
}

impl ShellRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            ignore_exit_status: true,
        }
    }

    /// Strict variant: non-zero exits and timeouts become errors.
    pub fn strict(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            ignore_exit_status: false,
        }
    }

    /// Run one command to completion.
    ///
    /// Announces the command on stdout first, then blocks until the child
    /// exits (or the timeout kills it).
    pub fn run(&self, request: &ShellRequest) -> Result<ExitStatus> {
        let cwd = request.cwd.as_deref().unwrap_or(Path::new("."));
        report::line(
            request.tag,
            format_args!("{} (cwd={})", request.command, cwd.display()),
        );
        debug!(command = %request.command, cwd = %cwd.display(), "spawning shell command");

        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(&request.command);
        if let Some(cwd) = &request.cwd {
            cmd.current_dir(cwd);
        }
        if let Some(log_path) = &request.log_path {
            let log = File::create(log_path)
                .with_context(|| format!("create log file {}", log_path.display()))?;
            let err_log = log
                .try_clone()
                .with_context(|| format!("clone log handle {}", log_path.display()))?;
            cmd.stdout(Stdio::from(log)).stderr(Stdio::from(err_log));
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawn shell command '{}'", request.command))?;

        let status = match self.timeout {
            Some(limit) => self.wait_bounded(&mut child, limit, &request.command)?,
            None => child.wait().context("wait for command")?,
        };

        if !status.success() {
            debug!(command = %request.command, code = ?status.code(), "command exited non-zero");
            if !self.ignore_exit_status {
                return Err(anyhow!(
                    "command '{}' failed with {status}",
                    request.command
                ));
            }
        }
        Ok(status)
    }

    fn wait_bounded(&self, child: &mut Child, limit: Duration, command: &str) -> Result<ExitStatus> {
        if let Some(status) = child.wait_timeout(limit).context("wait for command")? {
            return Ok(status);
        }
        warn!(command, timeout_secs = limit.as_secs(), "command timed out, killing");
        child.kill().context("kill timed-out command")?;
        let status = child.wait().context("wait for killed command")?;
        if !self.ignore_exit_status {
            return Err(anyhow!(
                "command '{command}' timed out after {}s",
                limit.as_secs()
            ));
        }
        Ok(status)
    }
}
