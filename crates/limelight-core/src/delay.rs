#![forbid(unsafe_code)]

//! Delayed continuations on a logical clock.
//!
//! A [`DelayQueue`] holds fire-and-forget payloads that become due after a
//! delay. The host advances the queue from its run loop with
//! [`DelayQueue::advance`]; due payloads come back in deadline order and the
//! caller acts on them. Nothing runs on its own, which keeps every
//! continuation on the owning thread.
//!
//! # Invariants
//!
//! 1. Payloads fire in ascending deadline order; ties fire in scheduling order.
//! 2. A payload fires at most once.
//! 3. After [`DelayQueue::cancel_all`], no payload scheduled before the call
//!    can fire.
//! 4. The logical clock never moves backwards.

use std::time::Duration;

#[derive(Debug)]
struct Pending<T> {
    due: Duration,
    seq: u64,
    payload: T,
}

/// Queue of delayed payloads driven by explicit time advancement.
#[derive(Debug)]
pub struct DelayQueue<T> {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DelayQueue<T> {
    /// Create an empty queue at logical time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current logical time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending payloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `payload` to fire `delay` after the current logical time.
    pub fn schedule(&mut self, delay: Duration, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due: self.now.saturating_add(delay),
            seq,
            payload,
        });
    }

    /// Drop every pending payload. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "limelight.delay", dropped, "delay queue cleared");
        dropped
    }

    /// Advance the logical clock by `dt` and return every payload that is now
    /// due, in deadline order.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now = self.now.saturating_add(dt);
        let now = self.now;

        let mut due = Vec::new();
        let mut idx = 0;
        while idx < self.pending.len() {
            if self.pending[idx].due <= now {
                due.push(self.pending.remove(idx));
            } else {
                idx += 1;
            }
        }
        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|p| p.payload).collect()
    }
}
