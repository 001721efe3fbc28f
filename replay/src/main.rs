//! Interactive commit replay tool.
//!
//! Reproduces and compares historical commits by checking each one out into
//! its own git worktree, running the configured build and run commands, and
//! capturing logs for inspection and diffing.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Parser;

use replay::io::config::load_config;
use replay::io::logs::LogStore;
use replay::io::worktree::WorktreeManager;
use replay::logging;
use replay::repl::run_loop;
use replay::session::ReplaySession;

#[derive(Parser)]
#[command(
    name = "replay",
    version,
    about = "Reproduce and compare historical commits in isolated worktrees"
)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    /// Repository whose commits are replayed.
    #[arg(long, default_value = ".")]
    repo: PathBuf,
    /// Root directory for per-commit checkouts.
    #[arg(long, default_value = "worktrees")]
    worktrees: PathBuf,
    /// Root directory for captured logs.
    #[arg(long, default_value = "logs")]
    logs: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    let worktrees = WorktreeManager::new(cli.repo, absolute(&cli.worktrees)?);
    let logs = LogStore::new(absolute(&cli.logs)?);
    let session = ReplaySession::new(config, worktrees, logs)?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::SeqCst);
    })
    .context("install interrupt handler")?;

    let stdin = std::io::stdin();
    run_loop(&session, &mut stdin.lock(), &interrupted)
}

/// Resolve a root to an absolute path so checkout paths mean the same thing
/// to git (running in the repository) and to this process.
fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("resolve {}", path.display()))
}
