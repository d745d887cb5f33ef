//! Snapshot files loaded from disk and run through a full evaluation pass

use std::fs;
use std::path::Path;

use tartan_config::load_snapshot;
use tartan_core::EvaluationLog;
use tartan_rules::evaluate_raw;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_secret_passcode_silences_alarm() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "secrets.yaml", "alarm_code: Testing1!\n");
    write_file(
        dir.path(),
        "house.yaml",
        r#"
proximity_occupied: true
alarm_armed: true
alarm_sounding: true
alarm_passcode: !secret alarm_code
given_passcode: "Testing1!"
"#,
    );

    let raw = load_snapshot(dir.path(), "house.yaml").unwrap();
    let mut log = EvaluationLog::new();
    let next = evaluate_raw(&raw, &mut log);

    assert!(!next.alarm_sounding);
    assert_eq!(next.alarm_passcode, "Testing1!");
}

#[test]
fn test_malformed_file_values_fail_safe() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "house.yaml",
        r#"
proximity_occupied: invalid_value
away_timer_active: maybe
door_open: true
light_on: true
"#,
    );

    let raw = load_snapshot(dir.path(), "house.yaml").unwrap();
    let mut log = EvaluationLog::new();
    let next = evaluate_raw(&raw, &mut log);

    assert!(!next.door_open);
    assert!(!next.light_on);
    assert!(next.away_timer_active);
    assert!(log.contains("Error: Invalid proximity state"));
    assert!(log.contains("Error: Invalid away timer value"));
}

#[test]
fn test_numeric_passcodes_compare_as_text() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "house.yaml",
        r#"
proximity_occupied: true
alarm_armed: true
alarm_sounding: true
alarm_passcode: 4321
given_passcode: "4321"
"#,
    );

    let raw = load_snapshot(dir.path(), "house.yaml").unwrap();
    let mut log = EvaluationLog::new();
    let next = evaluate_raw(&raw, &mut log);

    assert!(!next.alarm_sounding);
    assert!(!log.contains("Error:"));
}
