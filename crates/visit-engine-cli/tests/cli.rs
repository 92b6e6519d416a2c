use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn visit_slots() -> Command {
    let mut cmd = Command::cargo_bin("visit-slots").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_slots_monday() {
    let output = visit_slots()
        .args(["slots", "2024-06-10"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 21);
    assert_eq!(lines.first().unwrap(), "07:00");
    assert_eq!(lines.last().unwrap(), "17:00");
}

#[test]
fn test_slots_friday_json() {
    let output = visit_slots()
        .args(["--format", "json", "slots", "2024-06-14"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["date"], "2024-06-14");
    let slots = value["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 19);
    assert_eq!(slots[18], "16:00");
}

#[test]
fn test_slots_saturday_empty() {
    visit_slots()
        .args(["slots", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no slots available"));
}

#[test]
fn test_slots_without_date() {
    visit_slots()
        .arg("slots")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no date selected"));
}

#[test]
fn test_slots_without_date_json() {
    visit_slots()
        .args(["slots", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"date\": null"));
}

#[test]
fn test_slots_invalid_date_fails() {
    visit_slots()
        .args(["slots", "2024-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_range_week() {
    let output = visit_slots()
        .args(["range", "2024-06-10", "--days", "7"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with("2024-06-10 Mon 07:00"));
    assert!(lines[4].ends_with("16:00"));
    assert_eq!(lines[5], "2024-06-15 Sat closed");
    assert_eq!(lines[6], "2024-06-16 Sun closed");
}

#[test]
fn test_next_from_saturday() {
    visit_slots()
        .args(["next", "2024-06-15"])
        .assert()
        .success()
        .stdout("2024-06-17\n");
}

#[test]
fn test_next_nothing_in_horizon() {
    visit_slots()
        .args(["next", "2024-06-15", "--horizon", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no open date within 2 days"));
}

#[test]
fn test_check_available() {
    visit_slots()
        .args(["check", "2024-06-10", "17:00"])
        .assert()
        .success()
        .stdout("available\n");
}

#[test]
fn test_check_unavailable() {
    visit_slots()
        .args(["check", "2024-06-14", "16:30"])
        .assert()
        .failure()
        .stdout("unavailable\n");
}

#[test]
fn test_check_bad_time() {
    visit_slots()
        .args(["check", "2024-06-10", "noon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time"));
}

#[test]
fn test_custom_hours_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "step_minutes = 60").unwrap();
    writeln!(file, "saturday = {{ start_hour = 10, end_hour = 12 }}").unwrap();

    visit_slots()
        .args(["--hours"])
        .arg(file.path())
        .args(["slots", "2024-06-15"])
        .assert()
        .success()
        .stdout("10:00\n11:00\n12:00\n");
}

#[test]
fn test_invalid_hours_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "monday = {{ start_hour = 18, end_hour = 9 }}").unwrap();

    visit_slots()
        .args(["--hours"])
        .arg(file.path())
        .args(["slots", "2024-06-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid hours file"));
}

#[test]
fn test_missing_hours_file() {
    visit_slots()
        .args(["--hours", "/nonexistent/hours.toml", "slots", "2024-06-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read hours file"));
}
