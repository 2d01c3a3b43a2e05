// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline arithmetic for the phase cycle
//!
//! The first change happens one floor after start. After every change the
//! next deadline is `max(floor, jitter)` away, so the random delay dominates
//! but no interval is ever shorter than the floor.
//!
//! A delay too large to add to the current [`Instant`] leaves the schedule
//! without a deadline: it is never due and its remaining time is
//! `Duration::MAX`.

use crate::clock::Clock;
use crate::config::CyclerConfig;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct CycleSchedule {
    floor: Duration,
    deadline: Option<Instant>,
}

impl CycleSchedule {
    pub fn start(config: &CyclerConfig, clock: &impl Clock) -> Self {
        Self {
            floor: config.floor,
            deadline: clock.now().checked_add(config.floor),
        }
    }

    /// Time left until the deadline, zero once it has passed
    pub fn remaining(&self, clock: &impl Clock) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(clock.now()),
            None => Duration::MAX,
        }
    }

    pub fn is_due(&self, clock: &impl Clock) -> bool {
        self.deadline.is_some_and(|deadline| clock.now() >= deadline)
    }

    /// Set the next deadline after a change made now; returns the delay used
    pub fn reschedule(&mut self, clock: &impl Clock, jitter: Duration) -> Duration {
        let delay = jitter.max(self.floor);
        self.deadline = clock.now().checked_add(delay);
        delay
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
