//! Commit identifier guard.
//!
//! Identifiers become single path segments under the worktrees root, so the
//! guard rejects exactly what would escape that segment. Everything else,
//! including revision syntax like `HEAD~2` or a dotted tag, passes through
//! to git verbatim.

use anyhow::{Result, anyhow};

/// Validate that a commit identifier is safe as a single directory name.
pub fn validate_commit(commit: &str) -> Result<()> {
    if commit.is_empty() {
        return Err(anyhow!("commit id must not be empty"));
    }
    if commit.contains('/') || commit.contains('\\') {
        return Err(anyhow!(
            "commit id must not contain path separators (got '{commit}')"
        ));
    }
    if commit == "." || commit == ".." {
        return Err(anyhow!("commit id must not be '.' or '..'"));
    }
    Ok(())
}
