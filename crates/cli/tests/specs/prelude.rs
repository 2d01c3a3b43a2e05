// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Timing flags that make a run finish quickly
pub const FAST: &[&str] = &[
    "--floor",
    "50ms",
    "--jitter-min",
    "50ms",
    "--jitter-max",
    "80ms",
];

/// A scratch directory to run `tl` in
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root and return its path
    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn tl(&self) -> Cli {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tl"));
        cmd.current_dir(self.dir.path()).env_remove("RUST_LOG");
        Cli { cmd }
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require a zero exit status
    pub fn passes(mut self) -> Output {
        let assert = self.cmd.assert().success();
        Output::from(assert.get_output())
    }

    /// Run and require a non-zero exit status
    pub fn fails(mut self) -> Output {
        let assert = self.cmd.assert().failure();
        Output::from(assert.get_output())
    }
}

pub struct Output {
    pub stdout: String,
    pub stderr: String,
}

impl From<&std::process::Output> for Output {
    fn from(output: &std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Output {
    pub fn stdout_has(self, expected: &str) -> Self {
        assert!(
            predicate::str::contains(expected).eval(&self.stdout),
            "stdout missing {:?}:\n{}",
            expected,
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        assert!(
            !self.stdout.contains(unexpected),
            "stdout unexpectedly has {:?}:\n{}",
            unexpected,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        assert!(
            predicate::str::contains(expected).eval(&self.stderr),
            "stderr missing {:?}:\n{}",
            expected,
            self.stderr
        );
        self
    }

    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}
