// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase cycler
//!
//! Owns the light and a background thread that toggles it on a randomized
//! schedule. Every change is stored in an atomic for lock-free snapshots and
//! published to a single-slot [`SignalChannel`] for blocked observers.
//!
//! Observers share one channel, so each change wakes at most one of them and
//! a change that is overwritten before anyone drains it is never seen. A
//! caller waiting for green can therefore miss a green that lasted less than
//! its own wakeup; it still returns on a later one while the cycle runs.

use crate::channel::{RecvError, SignalChannel};
use crate::clock::{saturating_millis, SystemClock};
use crate::config::{ConfigError, CyclerConfig};
use crate::light::{Light, Phase, Transition};
use crate::schedule::CycleSchedule;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{mpsc, Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

const THREAD_NAME: &str = "phase-cycler";

#[derive(Debug, Error)]
pub enum CyclerError {
    #[error("phase cycle is already running")]
    AlreadyRunning,
    #[error("phase cycle was stopped and cannot be restarted")]
    Stopped,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn phase cycle thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("phase cycle thread panicked")]
    LoopPanicked,
}

enum LoopState {
    Idle,
    Running(JoinHandle<()>),
    Stopped,
}

/// State shared with the background thread
struct Shared {
    phase: AtomicU8,
    transitions: AtomicU64,
    channel: Arc<SignalChannel<Phase>>,
    feed: Mutex<Option<mpsc::Sender<Transition>>>,
    stop_requested: Mutex<bool>,
    wake: Condvar,
}

impl Shared {
    fn new() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Red.into()),
            transitions: AtomicU64::new(0),
            channel: Arc::new(SignalChannel::new()),
            feed: Mutex::new(None),
            stop_requested: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    /// Wait up to `timeout` or until a stop is requested; false once stopped.
    ///
    /// `Duration::MAX` waits for the stop alone. May return early on a
    /// spurious wakeup.
    fn rest(&self, timeout: Duration) -> bool {
        let mut stopped = self
            .stop_requested
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if *stopped {
            return false;
        }
        if timeout.is_zero() {
            return true;
        }
        stopped = if timeout == Duration::MAX {
            self.wake.wait(stopped).unwrap_or_else(|e| e.into_inner())
        } else {
            let (guard, _) = self
                .wake
                .wait_timeout(stopped, timeout)
                .unwrap_or_else(|e| e.into_inner());
            guard
        };
        !*stopped
    }

    fn request_stop(&self) {
        let mut stopped = self
            .stop_requested
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        *stopped = true;
        self.wake.notify_all();
    }

    fn publish(&self, transition: Transition) {
        self.phase.store(transition.to.into(), Ordering::Release);
        self.transitions.store(transition.seq, Ordering::Release);
        self.channel.send(transition.to);

        tracing::info!(
            seq = transition.seq,
            phase = %transition.to,
            interval_ms = saturating_millis(transition.interval),
            "phase changed"
        );

        let mut feed = self.feed.lock().unwrap_or_else(|e| e.into_inner());
        let disconnected = feed.as_ref().is_some_and(|tx| tx.send(transition).is_err());
        if disconnected {
            *feed = None;
        }
    }
}

/// The loop body run on the background thread
fn run_cycle(shared: &Shared, config: CyclerConfig) {
    let clock = SystemClock;
    let mut rng = rand::rng();
    let mut light = Light::new(&clock);
    let mut schedule = CycleSchedule::start(&config, &clock);

    tracing::debug!(
        floor_ms = saturating_millis(config.floor),
        jitter_min_ms = saturating_millis(config.jitter_min),
        jitter_max_ms = saturating_millis(config.jitter_max),
        "phase cycle started"
    );

    while shared.rest(schedule.remaining(&clock)) {
        if !schedule.is_due(&clock) {
            continue;
        }
        let (next, transition) = light.advance(&clock);
        light = next;
        shared.publish(transition);

        let delay = schedule.reschedule(&clock, config.draw_jitter(&mut rng));
        tracing::debug!(delay_ms = saturating_millis(delay), "next phase change scheduled");
    }

    tracing::debug!(transitions = light.transitions, "phase cycle stopped");
}

/// A traffic light that changes phase on its own thread
pub struct PhaseCycler {
    config: CyclerConfig,
    shared: Arc<Shared>,
    state: Mutex<LoopState>,
}

impl PhaseCycler {
    pub fn new(config: CyclerConfig) -> Self {
        Self {
            config,
            shared: Arc::new(Shared::new()),
            state: Mutex::new(LoopState::Idle),
        }
    }

    pub fn config(&self) -> &CyclerConfig {
        &self.config
    }

    fn lock_state(&self) -> MutexGuard<'_, LoopState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the phase; may change right after it is read
    pub fn current_phase(&self) -> Phase {
        Phase::from(self.shared.phase.load(Ordering::Acquire))
    }

    /// Number of phase changes made so far
    pub fn transitions(&self) -> u64 {
        self.shared.transitions.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.lock_state(), LoopState::Running(_))
    }

    /// The channel every phase change is published to
    pub fn channel(&self) -> Arc<SignalChannel<Phase>> {
        Arc::clone(&self.shared.channel)
    }

    /// Receive every transition in order from now on.
    ///
    /// Unlike the signal channel this feed keeps the full history. Only one
    /// feed exists at a time; subscribing again replaces the previous one.
    pub fn transition_feed(&self) -> mpsc::Receiver<Transition> {
        let (tx, rx) = mpsc::channel();
        *self.shared.feed.lock().unwrap_or_else(|e| e.into_inner()) = Some(tx);
        rx
    }

    /// Start the background cycle.
    ///
    /// The cycle runs until [`stop`](Self::stop) is called. Dropping the
    /// cycler without stopping it detaches the thread, which then runs until
    /// the process exits. A panic on the cycle thread aborts the process.
    /// An invalid config is rejected before the thread starts.
    pub fn simulate(&self) -> Result<(), CyclerError> {
        let mut state = self.lock_state();
        match *state {
            LoopState::Running(_) => return Err(CyclerError::AlreadyRunning),
            LoopState::Stopped => return Err(CyclerError::Stopped),
            LoopState::Idle => {}
        }
        self.config.validate()?;

        let shared = Arc::clone(&self.shared);
        let config = self.config;
        let handle = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| run_cycle(&shared, config)));
                if result.is_err() {
                    // Nothing restarts the cycle, so observers would hang forever
                    tracing::error!("phase cycle panicked, aborting");
                    std::process::abort();
                }
            })
            .map_err(CyclerError::Spawn)?;

        *state = LoopState::Running(handle);
        Ok(())
    }

    /// Block until a change to `target` is received.
    ///
    /// Hangs forever if the cycle is not running.
    pub fn wait_for_phase(&self, target: Phase) {
        loop {
            let phase = self.shared.channel.receive();
            if phase == target {
                return;
            }
            tracing::trace!(%phase, %target, "ignoring phase");
        }
    }

    pub fn wait_for_green(&self) {
        self.wait_for_phase(Phase::Green)
    }

    /// Like [`wait_for_phase`](Self::wait_for_phase) with an overall deadline.
    ///
    /// Returns [`RecvError::Timeout`] when `timeout` passes without a change
    /// to `target` and [`RecvError::Closed`] once the cycler is stopped. A
    /// timeout too large to form a deadline waits without one.
    pub fn wait_for_phase_timeout(&self, target: Phase, timeout: Duration) -> Result<(), RecvError> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let remaining = deadline.map_or(timeout, |d| d.saturating_duration_since(Instant::now()));
            let phase = self.shared.channel.receive_timeout(remaining)?;
            if phase == target {
                return Ok(());
            }
        }
    }

    /// Stop the cycle, join its thread and close the channel.
    ///
    /// Bounded waiters are released with [`RecvError::Closed`] and the
    /// transition feed ends. Stopping an idle cycler only closes the channel.
    pub fn stop(&self) -> Result<(), CyclerError> {
        let previous = std::mem::replace(&mut *self.lock_state(), LoopState::Stopped);
        self.shared.request_stop();

        let joined = match previous {
            LoopState::Running(handle) => handle.join().map_err(|_| CyclerError::LoopPanicked),
            LoopState::Idle | LoopState::Stopped => Ok(()),
        };

        self.shared.channel.close();
        *self.shared.feed.lock().unwrap_or_else(|e| e.into_inner()) = None;
        joined
    }
}

impl Default for PhaseCycler {
    fn default() -> Self {
        Self::new(CyclerConfig::default())
    }
}

#[cfg(test)]
#[path = "cycler_tests.rs"]
mod tests;
