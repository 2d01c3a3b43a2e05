//! Config specs
//!
//! Verify how defaults, files and flags combine.

use crate::prelude::*;

#[test]
fn defaults_match_reference_timing() {
    Project::empty()
        .tl()
        .args(&["config"])
        .passes()
        .stdout_has(r#"floor = "4s""#)
        .stdout_has(r#"jitter_min = "4s""#)
        .stdout_has(r#"jitter_max = "6s""#);
}

#[test]
fn file_values_are_used() {
    let temp = Project::empty();
    temp.file("tl.toml", "floor = \"2s\"\n");

    temp.tl()
        .args(&["config", "--config", "tl.toml"])
        .passes()
        .stdout_has(r#"floor = "2s""#)
        .stdout_has(r#"jitter_max = "6s""#);
}

#[test]
fn flags_override_file() {
    let temp = Project::empty();
    temp.file("tl.toml", "floor = \"2s\"\n");

    temp.tl()
        .args(&["config", "--config", "tl.toml", "--floor", "750ms"])
        .passes()
        .stdout_has(r#"floor = "750ms""#);
}

#[test]
fn json_format_is_machine_readable() {
    let output = Project::empty()
        .tl()
        .args(&["config", "--format", "json"])
        .passes();

    let value: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(value["floor"], "4s");
    assert_eq!(value["jitter_max"], "6s");
}

#[test]
fn inverted_jitter_fails() {
    Project::empty()
        .tl()
        .args(&["config", "--jitter-min", "9s"])
        .fails()
        .stderr_has("exceeds jitter_max");
}

#[test]
fn unknown_config_key_fails() {
    let temp = Project::empty();
    temp.file("tl.toml", "period = \"2s\"\n");

    temp.tl()
        .args(&["config", "--config", "tl.toml"])
        .fails()
        .stderr_has("tl.toml");
}

#[test]
fn floor_beyond_a_year_fails() {
    Project::empty()
        .tl()
        .args(&["config", "--floor", "2years"])
        .fails()
        .stderr_has("longest supported interval");
}
