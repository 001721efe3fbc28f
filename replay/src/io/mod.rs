//! I/O helpers for replay commands.

pub mod config;
pub mod diff;
pub mod logs;
pub mod shell;
pub mod worktree;
