//! External unified diff between two captured logs.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

/// Stream `diff -u left right` to the terminal.
///
/// The diff's exit status is not inspected; differing files are the
/// interesting case, not a failure. Only a spawn failure (no `diff` binary)
/// is an error.
pub fn unified_diff(left: &Path, right: &Path) -> Result<()> {
    debug!(left = %left.display(), right = %right.display(), "diffing logs");
    let status = Command::new("diff")
        .arg("-u")
        .arg(left)
        .arg(right)
        .status()
        .context("spawn diff -u")?;
    debug!(code = ?status.code(), "diff finished");
    Ok(())
}
