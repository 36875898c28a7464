//! Trailing-edge debounce for free-text input.
//!
//! The debouncer never spawns timers itself. Hosts drive it with the current
//! [`Instant`] from their event loop, which keeps firing deterministic and
//! lets tests step time explicitly.

use std::time::{Duration, Instant};

/// A value waiting for its quiet period to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledCommit<T> {
    pub value: T,
    pub due_at: Instant,
}

/// Holds at most one pending commit and restarts it on every new input.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<ScheduledCommit<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `value` to commit `delay` after `now`, replacing any pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.cancel();
        self.pending = Some(ScheduledCommit {
            value,
            due_at: now + self.delay,
        });
    }

    /// Drop the pending commit, returning its value.
    ///
    /// New input and teardown both go through here.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|scheduled| scheduled.value)
    }

    /// Fire the pending commit if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|scheduled| now >= scheduled.due_at);
        if due {
            self.cancel()
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending commit fires, if any.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|scheduled| scheduled.due_at)
    }
}
