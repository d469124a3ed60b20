use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn walksched() -> Command {
    Command::cargo_bin("walksched").unwrap()
}

fn parse_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

const FULL_DAY: &str = r#"{"availableRanges":[{"start":"09:00","end":"17:00"}]}"#;
const OVERNIGHT: &str = r#"{"availableRanges":[{"start":"22:00","end":"02:00"}]}"#;

#[test]
fn slots_from_stdin() {
    let output = walksched()
        .args([
            "slots",
            "--date",
            "2026-11-03",
            "--service",
            "solo-walk",
            "--now",
            "2026-11-01T12:00:00Z",
        ])
        .write_stdin(FULL_DAY)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = parse_stdout(&output);
    let slots = json["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 29);
    assert_eq!(slots[0]["start"], "09:00");
    assert_eq!(slots[0]["end"], "10:00");
    assert_eq!(slots[28]["start"], "16:00");
    assert!(json.get("message").is_none());
}

#[test]
fn slots_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(OVERNIGHT.as_bytes()).unwrap();

    let output = walksched()
        .args(["slots", "--date", "2026-11-03", "--service", "dog-sitting"])
        .arg("--ranges")
        .arg(file.path())
        .args(["--now", "2026-11-01T12:00:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = parse_stdout(&output);
    let starts: Vec<_> = json["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["start"].as_str().unwrap().to_string())
        .collect();
    assert!(starts.contains(&"23:00".to_string()));
    assert!(starts.contains(&"01:00".to_string()));
    assert!(!starts.contains(&"01:30".to_string()));
}

#[test]
fn slots_empty_day_reports_message() {
    walksched()
        .args([
            "slots",
            "--date",
            "2026-11-03",
            "--service",
            "quick-walk",
            "--now",
            "2026-11-01T12:00:00Z",
        ])
        .write_stdin(r#"{"availableRanges":[]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("No availability for this day"));
}

#[test]
fn ends_cross_midnight() {
    let output = walksched()
        .args(["ends", "--start", "23:00"])
        .write_stdin(OVERNIGHT)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = parse_stdout(&output);
    let ends = json["ends"].as_array().unwrap();
    assert_eq!(ends[0]["time"], "00:00");
    assert_eq!(ends[0]["nextDay"], true);
}

#[test]
fn window_for_walk_uses_fixed_duration() {
    let output = walksched()
        .args([
            "window",
            "--service",
            "solo-walk",
            "--date",
            "2026-11-03",
            "--start",
            "14:30",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = parse_stdout(&output);
    assert_eq!(json["service"], "solo-walk");
    assert_eq!(json["startTime"], "2026-11-03T14:30:00+00:00");
    assert_eq!(json["endTime"], "2026-11-03T15:30:00+00:00");
}

#[test]
fn window_for_multi_day_sitting() {
    let output = walksched()
        .args([
            "window",
            "--service",
            "dog-sitting",
            "--date",
            "2026-11-03",
            "--start",
            "18:00",
            "--end",
            "09:00",
            "--end-date",
            "2026-11-05",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = parse_stdout(&output);
    assert_eq!(json["startTime"], "2026-11-03T18:00:00+00:00");
    assert_eq!(json["endTime"], "2026-11-05T09:00:00+00:00");
}

#[test]
fn window_overnight_sitting_rolls_to_next_day() {
    let output = walksched()
        .args([
            "window",
            "--service",
            "dog-sitting",
            "--date",
            "2026-11-03",
            "--start",
            "22:00",
            "--end",
            "00:30",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = parse_stdout(&output);
    assert_eq!(json["endTime"], "2026-11-04T00:30:00+00:00");
}

#[test]
fn window_same_end_date_must_end_after_start() {
    walksched()
        .args([
            "window",
            "--service",
            "dog-sitting",
            "--date",
            "2026-11-03",
            "--start",
            "22:00",
            "--end",
            "00:30",
            "--end-date",
            "2026-11-03",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not after --start 22:00"));
}

#[test]
fn window_same_end_date_within_day() {
    let output = walksched()
        .args([
            "window",
            "--service",
            "dog-sitting",
            "--date",
            "2026-11-03",
            "--start",
            "09:00",
            "--end",
            "11:00",
            "--end-date",
            "2026-11-03",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = parse_stdout(&output);
    assert_eq!(json["endTime"], "2026-11-03T11:00:00+00:00");
}

#[test]
fn sitting_report_lists_conflicts() {
    let output = walksched()
        .args([
            "sitting",
            "--start-date",
            "2026-10-20",
            "--end-date",
            "2026-10-23",
        ])
        .write_stdin(r#"{"available":false,"type":"multi","conflicts":["2026-10-22"]}"#)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = parse_stdout(&output);
    assert_eq!(json["feasible"], false);
    assert_eq!(json["conflicts"][0]["label"], "Thu 22 Oct");
}

#[test]
fn sitting_same_day_is_rejected() {
    walksched()
        .args([
            "sitting",
            "--start-date",
            "2026-10-20",
            "--end-date",
            "2026-10-20",
        ])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("single day"));
}

#[test]
fn invalid_time_argument_fails() {
    walksched()
        .args(["ends", "--start", "25:00"])
        .write_stdin(OVERNIGHT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn invalid_json_fails() {
    walksched()
        .args(["ends", "--start", "23:00"])
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid availability JSON"));
}

#[test]
fn config_changes_timezone() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "timezone = \"America/New_York\"").unwrap();

    let output = walksched()
        .arg("--config")
        .arg(config.path())
        .args([
            "window",
            "--service",
            "quick-walk",
            "--date",
            "2026-11-03",
            "--start",
            "09:00",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = parse_stdout(&output);
    assert_eq!(json["startTime"], "2026-11-03T09:00:00-05:00");
}
