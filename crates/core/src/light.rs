// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traffic light state machine
//!
//! A light alternates between red and green forever. `Light` is a pure value:
//! advancing it returns the next light together with a [`Transition`] record
//! describing the change, leaving timing and publication to the cycler.

use crate::clock::{saturating_millis, Clock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// The color currently shown by the light
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Red,
    Green,
}

impl Phase {
    /// The phase that follows this one
    pub fn toggle(self) -> Phase {
        match self {
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Red,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Red => "red",
            Phase::Green => "green",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> u8 {
        match phase {
            Phase::Red => 0,
            Phase::Green => 1,
        }
    }
}

impl From<u8> for Phase {
    /// Any non-zero value reads as green
    fn from(raw: u8) -> Phase {
        if raw == 0 {
            Phase::Red
        } else {
            Phase::Green
        }
    }
}

/// A single phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// 1-based position of this change since the light was created
    pub seq: u64,
    pub from: Phase,
    pub to: Phase,
    /// Time spent in `from` before the change
    #[serde(rename = "interval_ms", serialize_with = "serialize_millis")]
    pub interval: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(saturating_millis(*d))
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} -> {} after {}ms",
            self.seq,
            self.from,
            self.to,
            saturating_millis(self.interval)
        )
    }
}

/// Snapshot of the light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Light {
    pub phase: Phase,
    /// Number of transitions since creation
    pub transitions: u64,
    pub last_change: Instant,
}

impl Light {
    /// A red light that has not changed yet
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            phase: Phase::Red,
            transitions: 0,
            last_change: clock.now(),
        }
    }

    /// Toggle the phase at the clock's current time
    pub fn advance(&self, clock: &impl Clock) -> (Light, Transition) {
        let interval = clock.elapsed_since(self.last_change);
        let next = Light {
            phase: self.phase.toggle(),
            transitions: self.transitions + 1,
            last_change: self.last_change + interval,
        };
        let transition = Transition {
            seq: next.transitions,
            from: self.phase,
            to: next.phase,
            interval,
        };
        (next, transition)
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
