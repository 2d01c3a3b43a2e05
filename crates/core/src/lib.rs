// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tl-core: Traffic light phase cycling
//!
//! This crate provides:
//! - A single-slot, latest-wins signal channel with blocking receive
//! - A pure red/green light state machine
//! - A background phase cycler with a randomized, floor-bounded schedule
//! - TOML configuration for the cycle timing

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod channel;
pub mod clock;
pub mod config;
pub mod cycler;
pub mod light;
pub mod schedule;

// Re-exports
pub use channel::{RecvError, SignalChannel};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, CyclerConfig};
pub use cycler::{CyclerError, PhaseCycler};
pub use light::{Light, Phase, Transition};
pub use schedule::CycleSchedule;
