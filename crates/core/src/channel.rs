// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-slot signal channel
//!
//! A `SignalChannel` retains at most one value. Sending overwrites whatever is
//! pending, so a receiver always gets the most recent state and never a
//! backlog. Receivers block on a condition variable with the slot lock
//! released, so the sender never waits on a reader.
//!
//! Each send wakes exactly one blocked receiver. With several receivers on
//! one channel a value is delivered to at most one of them; this is not a
//! broadcast primitive.

use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Why a bounded receive returned without a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecvError {
    #[error("timed out waiting for a signal")]
    Timeout,
    #[error("signal channel closed")]
    Closed,
}

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    closed: bool,
}

/// Latest-wins handoff between one writer and blocked readers
#[derive(Debug)]
pub struct SignalChannel<T> {
    slot: Mutex<Slot<T>>,
    ready: Condvar,
}

impl<T> SignalChannel<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: None,
                closed: false,
            }),
            ready: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store `value`, dropping any unconsumed one, and wake one receiver.
    ///
    /// Never blocks on readers. A closed channel still accepts values so a
    /// late `try_receive` can observe the final state.
    pub fn send(&self, value: T) {
        let mut slot = self.lock();
        slot.value = Some(value);
        self.ready.notify_one();
    }

    /// Block until a value is available and take it.
    ///
    /// Waits indefinitely; closing the channel does not release this call.
    /// Use [`receive_timeout`](Self::receive_timeout) when the wait must be
    /// bounded or cancellable.
    pub fn receive(&self) -> T {
        let mut slot = self.lock();
        loop {
            if let Some(value) = slot.value.take() {
                return value;
            }
            slot = self.ready.wait(slot).unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Block for at most `timeout` waiting for a value.
    ///
    /// A pending value is returned even if the channel has been closed. A
    /// timeout too large to form a deadline (such as `Duration::MAX`) waits
    /// until a value arrives or the channel is closed.
    pub fn receive_timeout(&self, timeout: Duration) -> Result<T, RecvError> {
        let deadline = Instant::now().checked_add(timeout);
        let mut slot = self.lock();
        loop {
            if let Some(value) = slot.value.take() {
                return Ok(value);
            }
            if slot.closed {
                return Err(RecvError::Closed);
            }
            slot = match deadline {
                None => self.ready.wait(slot).unwrap_or_else(|e| e.into_inner()),
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return Err(RecvError::Timeout);
                    }
                    let (guard, _) = self
                        .ready
                        .wait_timeout(slot, remaining)
                        .unwrap_or_else(|e| e.into_inner());
                    guard
                }
            };
        }
    }

    /// Take the pending value without blocking
    pub fn try_receive(&self) -> Option<T> {
        self.lock().value.take()
    }

    /// Whether a value is waiting to be received
    pub fn has_pending(&self) -> bool {
        self.lock().value.is_some()
    }

    /// Mark the channel closed and wake every waiter.
    ///
    /// Bounded receivers on an empty channel return [`RecvError::Closed`].
    pub fn close(&self) {
        let mut slot = self.lock();
        slot.closed = true;
        self.ready.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

impl<T> Default for SignalChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
