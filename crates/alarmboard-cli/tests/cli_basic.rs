//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a scratch directory so
//! config commands never touch the real one.

use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli_in(home: &std::path::Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_alarmboard"))
        .args(args)
        .env("HOME", home)
        .env_remove("ALARMBOARD_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let home = tempfile::tempdir().unwrap();
    run_cli_in(home.path(), args)
}

#[test]
fn test_repeat_label_weekdays() {
    let (code, stdout, _) = run_cli(&["repeat", "label", "--weekdays", "mon,tue,wed,thu,fri"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Mon, Tue, Wed, Thu, Fri every week");
}

#[test]
fn test_repeat_label_interval_and_monthly() {
    let (_, stdout, _) = run_cli(&["repeat", "label", "--weekdays", "mon", "--every", "2"]);
    assert_eq!(stdout.trim(), "Mon every 2 weeks");

    let (_, stdout, _) = run_cli(&["repeat", "label", "--monthly", "15,1"]);
    assert_eq!(stdout.trim(), "on days 1, 15 of every month");
}

#[test]
fn test_repeat_next() {
    let (code, stdout, _) = run_cli(&[
        "repeat", "next", "--weekdays", "mon", "--time", "06:40", "--now", "2026-10-16 07:00",
    ]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2026-10-19 06:40");
}

#[test]
fn test_repeat_next_unresolvable_fails() {
    let (code, _, stderr) = run_cli(&["repeat", "next", "--weekdays", "", "--time", "06:40"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("No occurrence"), "stderr: {stderr}");
}

#[test]
fn test_gesture_simulate_double_tap() {
    let (code, stdout, _) = run_cli(&["gesture", "simulate", "press@0 release@60 press@150 release@200"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("DoubleTap"), "stdout: {stdout}");
    assert!(!stdout.contains(" Tap"), "stdout: {stdout}");
}

#[test]
fn test_gesture_simulate_long_press_json() {
    let (code, stdout, _) = run_cli(&["gesture", "simulate", "--json", "press@0 release@500"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let events = parsed.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["gesture"], "longPress");
    assert_eq!(events[0]["at_ms"], 450);
}

#[test]
fn test_pattern_confirm() {
    let (code, stdout, _) = run_cli(&["pattern", "confirm", "--candidate", "0,4,8", "--confirm", "0,4,8"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "success [0,4,8]");

    let (code, _, stderr) = run_cli(&["pattern", "confirm", "--candidate", "0,4,8", "--confirm", "0,4,7"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("does not match"), "stderr: {stderr}");

    let (code, _, stderr) = run_cli(&["pattern", "confirm", "--candidate", "4"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("too short"), "stderr: {stderr}");
}

#[test]
fn test_pattern_trace() {
    let (code, stdout, _) = run_cli(&["pattern", "trace", "40,40 80,40 120,40 120,120"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "[0,1,4]");
}

#[test]
fn test_demo_lists_three_alarms() {
    let (code, stdout, _) = run_cli(&["demo", "--now", "2026-10-16 07:00"]);
    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("06:40"));
    assert!(lines[0].contains("2026-10-19 06:40"));
    assert!(lines[1].contains("off"));
}

#[test]
fn test_config_set_get_roundtrip() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli_in(home.path(), &["config", "set", "gesture.tap_window_ms", "300"]);
    assert_eq!(code, 0);
    let (code, stdout, _) = run_cli_in(home.path(), &["config", "get", "gesture.tap_window_ms"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "300");

    let (code, _, _) = run_cli_in(home.path(), &["config", "get", "gesture.nope"]);
    assert_ne!(code, 0);
}
