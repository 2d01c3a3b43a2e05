// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod config;
pub mod run;

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tl_core::CyclerConfig;

/// Timing options shared by commands that build a cycler
#[derive(Args, Debug, Default)]
pub struct TimingArgs {
    /// TOML file with `floor`, `jitter_min` and `jitter_max`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum time between phase changes (e.g. "4s", "250ms")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub floor: Option<Duration>,

    /// Lower bound of the random delay after each change
    #[arg(long, value_parser = humantime::parse_duration)]
    pub jitter_min: Option<Duration>,

    /// Upper bound of the random delay after each change
    #[arg(long, value_parser = humantime::parse_duration)]
    pub jitter_max: Option<Duration>,
}

impl TimingArgs {
    /// Defaults, overlaid by the config file, overlaid by flags
    pub fn resolve(&self) -> Result<CyclerConfig> {
        let mut config = match &self.config {
            Some(path) => CyclerConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => CyclerConfig::default(),
        };

        if let Some(floor) = self.floor {
            config.floor = floor;
        }
        if let Some(min) = self.jitter_min {
            config.jitter_min = min;
        }
        if let Some(max) = self.jitter_max {
            config.jitter_max = max;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
