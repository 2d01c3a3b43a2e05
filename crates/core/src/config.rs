// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cycler timing configuration
//!
//! Durations are written in humantime form, for example:
//!
//! ```toml
//! floor = "4s"
//! jitter_min = "4s"
//! jitter_max = "6s"
//! ```
//!
//! Keys left out of a file keep their default values.

use crate::clock::saturating_millis;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("jitter_min ({min:?}) exceeds jitter_max ({max:?})")]
    InvalidJitter { min: Duration, max: Duration },
    #[error("floor and jitter are all zero; the light would never rest")]
    ZeroInterval,
    #[error("{field} ({value:?}) exceeds the longest supported interval ({max:?})")]
    IntervalTooLong {
        field: &'static str,
        value: Duration,
        max: Duration,
    },
}

/// Longest floor or jitter a config may ask for (one year)
pub const MAX_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Timing rules for the background cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CyclerConfig {
    /// Minimum time between two transitions
    #[serde(with = "humantime_serde")]
    pub floor: Duration,
    /// Lower bound of the random delay drawn after each transition
    #[serde(with = "humantime_serde")]
    pub jitter_min: Duration,
    /// Upper bound (inclusive) of the random delay
    #[serde(with = "humantime_serde")]
    pub jitter_max: Duration,
}

impl Default for CyclerConfig {
    fn default() -> Self {
        Self {
            floor: Duration::from_secs(4),
            jitter_min: Duration::from_secs(4),
            jitter_max: Duration::from_secs(6),
        }
    }
}

impl CyclerConfig {
    pub fn with_floor(mut self, floor: Duration) -> Self {
        self.floor = floor;
        self
    }

    pub fn with_jitter(mut self, min: Duration, max: Duration) -> Self {
        self.jitter_min = min;
        self.jitter_max = max;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: CyclerConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jitter_min > self.jitter_max {
            return Err(ConfigError::InvalidJitter {
                min: self.jitter_min,
                max: self.jitter_max,
            });
        }
        if self.floor.is_zero() && self.jitter_max.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        for (field, value) in [("floor", self.floor), ("jitter_max", self.jitter_max)] {
            if value > MAX_INTERVAL {
                return Err(ConfigError::IntervalTooLong {
                    field,
                    value,
                    max: MAX_INTERVAL,
                });
            }
        }
        Ok(())
    }

    /// Draw a delay uniformly from `[jitter_min, jitter_max]` at millisecond
    /// granularity
    pub fn draw_jitter(&self, rng: &mut impl Rng) -> Duration {
        let min = saturating_millis(self.jitter_min);
        let max = saturating_millis(self.jitter_max).max(min);
        Duration::from_millis(rng.random_range(min..=max))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
