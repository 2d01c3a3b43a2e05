//! Run specs
//!
//! Verify a short, fast run of the light with observers.

use crate::prelude::*;

#[test]
fn run_reports_start_changes_and_summary() {
    Project::empty()
        .tl()
        .args(&["run"])
        .args(FAST)
        .args(&["--duration", "600ms"])
        .passes()
        .stdout_has("Light started: red (1 observers)")
        .stdout_has("#1 red -> green")
        .stdout_has("#2 green -> red")
        .stdout_has("Transitions:")
        .stdout_has("Final phase:");
}

#[test]
fn observer_crosses_on_green() {
    Project::empty()
        .tl()
        .args(&["run"])
        .args(FAST)
        .args(&["--duration", "600ms"])
        .passes()
        .stdout_has("Observer 0: crossing on green");
}

#[test]
fn run_without_observers_still_cycles() {
    Project::empty()
        .tl()
        .args(&["run", "--observers", "0"])
        .args(FAST)
        .args(&["--duration", "300ms"])
        .passes()
        .stdout_has("(0 observers)")
        .stdout_has("red -> green")
        .stdout_lacks("crossing");
}

#[test]
fn json_run_emits_one_event_per_line() {
    let output = Project::empty()
        .tl()
        .args(&["run", "--format", "json", "--observers", "2"])
        .args(FAST)
        .args(&["--duration", "400ms"])
        .passes();

    let events: Vec<serde_json::Value> = output
        .stdout_lines()
        .into_iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(events.first().unwrap()["event"], "started");
    assert_eq!(events.last().unwrap()["event"], "stopped");

    let changes: Vec<_> = events.iter().filter(|e| e["event"] == "changed").collect();
    assert!(!changes.is_empty());
    for (i, change) in changes.iter().enumerate() {
        assert_eq!(change["seq"], (i + 1) as u64);
        assert!(change["interval_ms"].as_u64().unwrap() >= 50);
    }
}

#[test]
fn run_logs_changes_when_asked() {
    Project::empty()
        .tl()
        .env("RUST_LOG", "info")
        .args(&["run", "--observers", "0"])
        .args(FAST)
        .args(&["--duration", "300ms"])
        .passes()
        .stderr_has("phase changed");
}

#[test]
fn oversized_floor_is_rejected_before_starting() {
    Project::empty()
        .tl()
        .args(&[
            "run",
            "--floor",
            "293000000000years",
            "--jitter-min",
            "1s",
            "--jitter-max",
            "2s",
            "--duration",
            "200ms",
        ])
        .fails()
        .stderr_has("longest supported interval")
        .stdout_lacks("Light started");
}
