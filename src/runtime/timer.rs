// SPDX-License-Identifier: MPL-2.0
//! Pausable one-shot timer.
//!
//! The timer keeps a remaining budget. Pausing cancels the scheduled
//! callback and deducts the time elapsed since the last (re)start; resuming
//! schedules the callback again for whatever budget is left. Pausing twice
//! in a row is not guarded against: the second pause deducts the time since
//! the last resume a second time.

use super::scheduler::TimeoutId;
use super::Runtime;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

struct TimerState {
    runtime: Runtime,
    callback: Rc<dyn Fn()>,
    remaining: Cell<Duration>,
    started: Cell<Duration>,
    handle: Cell<Option<TimeoutId>>,
}

/// A delayed callback that can be paused, resumed and cancelled.
///
/// Dropping the timer cancels a pending callback.
pub struct Timer {
    state: Rc<TimerState>,
}

impl Timer {
    /// Creates the timer and immediately schedules `callback` after `delay`.
    pub fn start(runtime: Runtime, delay: Duration, callback: impl Fn() + 'static) -> Self {
        let timer = Self {
            state: Rc::new(TimerState {
                runtime,
                callback: Rc::new(callback),
                remaining: Cell::new(delay),
                started: Cell::new(Duration::ZERO),
                handle: Cell::new(None),
            }),
        };
        timer.resume();
        timer
    }

    pub fn pause(&self) {
        self.clear();
        let elapsed = self
            .state
            .runtime
            .now()
            .saturating_sub(self.state.started.get());
        let remaining = self.state.remaining.get().saturating_sub(elapsed);
        self.state.remaining.set(remaining);
        tracing::trace!(remaining_ms = remaining.as_millis() as u64, "timer paused");
    }

    pub fn resume(&self) {
        self.state.started.set(self.state.runtime.now());
        self.clear();

        let state = Rc::downgrade(&self.state);
        let callback = Rc::clone(&self.state.callback);
        let remaining = self.state.remaining.get();
        let id = self.state.runtime.set_timeout(
            remaining,
            Box::new(move || {
                if let Some(state) = state.upgrade() {
                    state.handle.set(None);
                }
                callback();
            }),
        );
        self.state.handle.set(Some(id));
        tracing::trace!(remaining_ms = remaining.as_millis() as u64, "timer scheduled");
    }

    /// Cancels the pending callback without running it.
    pub fn cancel(&self) {
        self.clear();
    }

    /// Budget left as of the last pause (or the initial delay).
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.state.remaining.get()
    }

    /// Returns true while a callback is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.handle.get().is_some()
    }

    fn clear(&self) {
        if let Some(id) = self.state.handle.take() {
            self.state.runtime.clear_timeout(id);
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("remaining", &self.state.remaining.get())
            .field("pending", &self.is_pending())
            .finish()
    }
}
