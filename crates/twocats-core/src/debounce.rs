//! Trailing-edge debouncing
//!
//! [`Debounce`] is the bare policy: it remembers the single pending timer in a
//! [`TimerQueue`] and replaces it on every call. [`Debounced`] wraps a callback
//! with its own queue for callers that just want "run `f` with the last
//! arguments once things calm down".

use std::time::Duration;

use crate::scheduler::{TimerId, TimerQueue};

/// Keeps at most one pending timer alive in a shared queue
#[derive(Debug, Clone)]
pub struct Debounce {
    wait: Duration,
    pending: Option<TimerId>,
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Cancel the pending call (if any) and schedule `task` `wait` after `now`
    pub fn call<T>(&mut self, timers: &mut TimerQueue<T>, now: Duration, task: T) -> TimerId {
        if let Some(previous) = self.pending.take() {
            timers.cancel(previous);
        }
        let id = timers.schedule_after(now, self.wait, task);
        self.pending = Some(id);
        id
    }

    /// Record that timer `id` fired. Returns false for a timer this debounce no longer owns.
    pub fn fired(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// A callback that only runs for the last invocation of each burst
pub struct Debounced<A, F>
where
    F: FnMut(A),
{
    debounce: Debounce,
    timers: TimerQueue<A>,
    callback: F,
}

impl<A, F> Debounced<A, F>
where
    F: FnMut(A),
{
    pub fn new(wait: Duration, callback: F) -> Self {
        Self {
            debounce: Debounce::new(wait),
            timers: TimerQueue::new(),
            callback,
        }
    }

    /// Invoke the wrapper. The callback runs later, from [`Debounced::flush`].
    pub fn call(&mut self, now: Duration, args: A) {
        self.debounce.call(&mut self.timers, now, args);
    }

    /// Run the callback if the pending call is due. Returns whether it ran.
    pub fn flush(&mut self, now: Duration) -> bool {
        let mut ran = false;
        while let Some(due) = self.timers.pop_due(now) {
            if self.debounce.fired(due.id) {
                (self.callback)(due.task);
                ran = true;
            }
        }
        ran
    }

    /// When the pending call becomes due
    pub fn deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn cancel(&mut self) {
        self.debounce.cancel(&mut self.timers);
    }
}
