//! REPL sessions against the spawned binary.
//!
//! Pipes scripted command lines over stdin and checks the product output
//! stream plus filesystem effects.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use replay::io::config::ReplayConfig;
use replay::test_support::TestRepo;

fn default_config() -> ReplayConfig {
    ReplayConfig {
        build_command: "true".to_string(),
        run_command: "cat msg.txt".to_string(),
        command_timeout_secs: None,
    }
}

/// Spawn the binary in the repo's temp root and feed it `script` on stdin.
fn run_repl(repo: &TestRepo, script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_replay"))
        .current_dir(repo.root())
        .args(["--repo", "repo"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn replay");
    // A startup failure may close stdin before the script is consumed.
    let _ = child
        .stdin
        .as_mut()
        .expect("stdin")
        .write_all(script.as_bytes());
    child.wait_with_output().expect("replay output")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn exit_command_ends_the_session_cleanly() {
    let repo = TestRepo::init().expect("repo");
    repo.write_config(&default_config()).expect("config");

    let output = run_repl(&repo, "exit\n");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("=== Commit Replay Tool ==="));
    assert!(stdout.contains("[EXIT] exiting."));
}

#[test]
fn end_of_input_prints_the_exit_notice() {
    let repo = TestRepo::init().expect("repo");
    repo.write_config(&default_config()).expect("config");

    let output = run_repl(&repo, "");

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("[EXIT] exiting."));
}

#[test]
fn usage_error_keeps_the_loop_alive() {
    let repo = TestRepo::init().expect("repo");
    repo.write_config(&default_config()).expect("config");

    let output = run_repl(&repo, "reproduce\nhelp\nexit\n");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("[ERROR] usage: reproduce <commit>"));
    assert!(stdout.contains("=== Commit Replay Tool commands ==="));
    assert!(stdout.contains("[EXIT] exiting."));
    let checkouts = std::fs::read_dir(repo.worktrees_root()).expect("read worktrees");
    assert_eq!(checkouts.count(), 0);
}

#[test]
fn unknown_command_is_reported() {
    let repo = TestRepo::init().expect("repo");
    repo.write_config(&default_config()).expect("config");

    let output = run_repl(&repo, "frobnicate\nexit\n");

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("[ERROR] unknown command: frobnicate"));
}

#[test]
fn uppercase_verbs_are_recognized() {
    let repo = TestRepo::init().expect("repo");
    repo.write_config(&default_config()).expect("config");

    let output = run_repl(&repo, "REPRODUCE\nexit\n");

    // Wrong arity on the recognized verb, not an unknown command.
    assert!(stdout_of(&output).contains("[ERROR] usage: reproduce <commit>"));
}

#[test]
fn reproduce_writes_the_commit_log() {
    let repo = TestRepo::init().expect("repo");
    let commit = repo
        .commit_file("msg.txt", "hello\n", "feat: msg")
        .expect("commit");
    repo.write_config(&default_config()).expect("config");

    let output = run_repl(&repo, &format!("reproduce {commit}\nexit\n"));

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("[BUILD]"));
    assert!(stdout.contains("[DONE] log saved:"));
    let log = std::fs::read_to_string(repo.root().join("logs").join(format!("{commit}.log")))
        .expect("log");
    assert_eq!(log, "hello\n");
}

#[test]
fn compare_prints_the_unified_diff() {
    let repo = TestRepo::init().expect("repo");
    let first = repo
        .commit_file("msg.txt", "one\n", "feat: one")
        .expect("commit one");
    let second = repo
        .commit_file("msg.txt", "two\n", "feat: two")
        .expect("commit two");
    repo.write_config(&default_config()).expect("config");

    let output = run_repl(&repo, &format!("compare {first} {second}\nexit\n"));

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains(&format!("[DONE] {first} log:")));
    assert!(stdout.contains(&format!("[DONE] {second} log:")));
    // The diff of the two captured run logs lands on the session stream.
    assert!(stdout.contains("-one"));
    assert!(stdout.contains("+two"));
}

#[test]
fn failed_operation_does_not_end_the_session() {
    let repo = TestRepo::init().expect("repo");
    repo.write_config(&default_config()).expect("config");

    let output = run_repl(&repo, "reproduce no-such-commit\nhelp\nexit\n");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("[ERROR] operation failed:"));
    assert!(stdout.contains("=== Commit Replay Tool commands ==="));
    assert!(stdout.contains("[EXIT] exiting."));
}

#[test]
fn missing_config_is_a_startup_error() {
    let repo = TestRepo::init().expect("repo");

    let output = run_repl(&repo, "exit\n");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config.json"));
    assert!(!stdout_of(&output).contains("=== Commit Replay Tool ==="));
}
