//! Commit replay tool: build, run, and compare historical commits of a git
//! repository in isolated worktree checkouts.
//!
//! The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (input-line parsing, commit id
//!   validation). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (configuration, checkouts, shell
//!   commands, log paths, diffing).
//!
//! [`session`] sequences core logic with I/O to implement the three verbs
//! (reproduce, compare, cleanup); [`repl`] drives a session from
//! line-oriented input.

pub mod core;
pub mod io;
pub mod logging;
pub mod repl;
pub mod report;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
