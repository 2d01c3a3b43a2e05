//! CLI help specs
//!
//! Verify top-level help and argument errors.

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .tl()
        .args(&["--help"])
        .passes()
        .stdout_has("run")
        .stdout_has("config")
        .stdout_has("completions");
}

#[test]
fn run_help_documents_timing_flags() {
    Project::empty()
        .tl()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--floor")
        .stdout_has("--jitter-min")
        .stdout_has("--observers")
        .stdout_has("--duration");
}

#[test]
fn invalid_duration_is_rejected() {
    Project::empty()
        .tl()
        .args(&["config", "--floor", "soon"])
        .fails()
        .stderr_has("--floor");
}

#[test]
fn completions_generate_for_bash() {
    Project::empty()
        .tl()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("tl");
}
