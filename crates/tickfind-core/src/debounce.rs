//! Quiet-window debouncing of a rapidly changing value.
//!
//! [`Debouncer`] holds no timer of its own. The owner feeds it values with
//! [`Debouncer::update`], sleeps until [`Debouncer::deadline`], then calls
//! [`Debouncer::poll`]. Every update replaces the pending value and pushes
//! the deadline out, so only the last value of a burst is ever settled.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    settled: T,
    pending: Option<Pending<T>>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    /// The most recently settled value.
    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|pending| &pending.value)
    }

    /// When the pending value settles, if one is waiting.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Record a new raw value and restart the quiet window.
    ///
    /// Any pending value is cancelled first. Writing back the already settled
    /// value schedules no new wait.
    pub fn update(&mut self, value: T, now: Instant) {
        self.cancel();
        if value == self.settled {
            return;
        }
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Drop the pending value. Returns it if one was waiting.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Settle the pending value if its window has elapsed.
    ///
    /// Returns `true` when the settled value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some(pending) if now >= pending.deadline => {
                let changed = pending.value != self.settled;
                self.settled = pending.value;
                changed
            }
            other => {
                self.pending = other;
                false
            }
        }
    }
}
