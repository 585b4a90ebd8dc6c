//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory and
//! verify outputs.

use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pomodoro-clock"))
        .args(args)
        .env("POMODORO_CLOCK_HOME", home)
        .env_remove("POMODORO_CLOCK_ENV")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn simulate(home: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["simulate"];
    full.extend_from_slice(args);
    let (stdout, stderr, code) = run_cli(home, &full);
    assert_eq!(code, 0, "simulate failed: {stderr}");
    serde_json::from_str(&stdout).expect("simulate prints JSON")
}

#[test]
fn test_format() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["format", "90"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "01:30");

    let (stdout, _, _) = run_cli(home.path(), &["format", "1500"]);
    assert_eq!(stdout.trim(), "25:00");
}

#[test]
fn test_simulate_full_work_phase() {
    let home = tempfile::tempdir().unwrap();
    let report = simulate(home.path(), &["--seconds", "1500"]);
    let snap = &report["snapshot"];
    assert_eq!(snap["type"], "StateSnapshot");
    assert_eq!(snap["phase"], "break");
    assert_eq!(snap["state"], "running");
    assert_eq!(snap["remaining_secs"], 300);
    assert_eq!(report["alerts"], 1);
    assert_eq!(report["live_ticks"], 1);
}

#[test]
fn test_simulate_custom_lengths() {
    let home = tempfile::tempdir().unwrap();
    let report = simulate(
        home.path(),
        &["--seconds", "61", "--work-min", "1", "--break-min", "2"],
    );
    let snap = &report["snapshot"];
    assert_eq!(snap["phase"], "break");
    assert_eq!(snap["remaining_secs"], 119);
    assert_eq!(snap["work_length_secs"], 60);
    assert_eq!(snap["break_length_secs"], 120);
}

#[test]
fn test_simulate_rejects_out_of_range_length() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["simulate", "--seconds", "1", "--work-min", "61"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("between 1 and 60 minutes"));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "timer.poll_interval_ms"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "30");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "alert.enabled", "false"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "alert.enabled"]);
    assert_eq!(stdout.trim(), "false");

    assert!(home.path().join("pomodoro-clock").join("config.toml").exists());
}

#[test]
fn test_invalid_config_warns_and_falls_back() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("pomodoro-clock");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[timer]\npoll_interval_ms = 0\n").unwrap();

    let (stdout, stderr, code) = run_cli(home.path(), &["format", "90"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "01:30");
    assert!(stderr.contains("using default configuration"), "stderr: {stderr}");
    assert!(stderr.contains("timer.poll_interval_ms"), "stderr: {stderr}");
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "theme"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));

    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.poll_interval_ms", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_list_and_reset() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["config", "set", "logging.level", "debug"]);
    let (stdout, _, code) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.lines().any(|line| line == "logging.level = debug"));
    assert!(stdout.lines().any(|line| line == "timer.poll_interval_ms = 30"));

    let (_, _, code) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "logging.level"]);
    assert_eq!(stdout.trim(), "warn");
}

#[test]
fn test_run_exits_on_closed_stdin() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["config", "set", "alert.enabled", "false"]);
    let (stdout, _, code) = run_cli(home.path(), &["run"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Work time!"));
    assert!(stdout.contains("25:00"));
}
