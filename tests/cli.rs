//! Integration tests driving the compiled `jcsh` binary as a subprocess.
//!
//! These exercise the subset of behavior that doesn't require a real
//! controlling terminal: CLI surface, built-in dispatch, and background job
//! bookkeeping over a piped stdin. Scenarios that need terminal handoff
//! (`fg`, `stop`) are gated behind `#[ignore]`, matching the teacher's
//! convention for environment-dependent tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn jcsh() -> Command {
    Command::cargo_bin("jcsh").unwrap()
}

#[test]
fn help_flag_prints_usage_and_exits_zero() {
    jcsh()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("jcsh"));
}

#[test]
fn unknown_flag_fails() {
    jcsh().arg("--bogus").assert().failure();
}

#[test]
fn quit_exits_cleanly_on_empty_session() {
    jcsh()
        .write_stdin("quit\n")
        .assert()
        .success();
}

#[test]
fn background_job_is_announced_and_reaped() {
    jcsh()
        .write_stdin("true &\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1]"));
}

#[test]
fn plugin_dir_flag_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    jcsh()
        .arg("-p")
        .arg(dir.path())
        .write_stdin("quit\n")
        .assert()
        .success();
}

#[test]
fn jobs_lists_nothing_when_table_is_empty() {
    jcsh()
        .write_stdin("jobs\nquit\n")
        .assert()
        .success();
}

#[test]
fn fg_without_a_controlling_terminal_reports_no_job_control() {
    // Piped stdin means the session never claims a controlling terminal, so
    // fg/bg/stop report the same "job control is not enabled" error a
    // non-interactive shell invocation would.
    jcsh()
        .write_stdin("fg 99\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("job control is not enabled"));
}

#[test]
#[ignore]
fn unknown_jid_reports_standard_message_under_a_pty() {
    // Requires a pseudo-terminal to exercise the interactive fg/bg/stop
    // path and its "No job with matching ID" wording; not run by default.
}

#[test]
#[ignore]
fn fg_restores_terminal_ownership_to_shell() {
    // Requires a pseudo-terminal to exercise tcsetpgrp handoff; not run by
    // default.
}
