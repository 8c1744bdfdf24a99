// SPDX-License-Identifier: MPL-2.0
//! Deferred callback scheduling.
//!
//! [`VirtualLoop`] is a deterministic event loop driven by hand: time only
//! moves when [`VirtualLoop::advance`] is called. [`TokioScheduler`] runs
//! callbacks on real timers and must be used from inside a tokio
//! [`LocalSet`](tokio::task::LocalSet), since callbacks are not `Send`.

use super::clock::Clock;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;
use tokio::task::AbortHandle;

pub type TimeoutCallback = Box<dyn FnOnce()>;

/// Identifies a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeoutId(u64);

/// Schedules one-shot callbacks.
pub trait Scheduler {
    /// Runs `callback` once after `delay`.
    fn set_timeout(&self, delay: Duration, callback: TimeoutCallback) -> TimeoutId;

    /// Cancels a pending callback. Unknown or already fired ids are ignored.
    fn clear_timeout(&self, id: TimeoutId);
}

// =============================================================================
// VirtualLoop
// =============================================================================

/// Manually advanced event loop that is also its own clock.
///
/// Callbacks due at the same instant run in scheduling order.
#[derive(Default)]
pub struct VirtualLoop {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    queue: RefCell<BTreeMap<(Duration, u64), TimeoutCallback>>,
    deadlines: RefCell<HashMap<u64, Duration>>,
}

impl VirtualLoop {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Moves time forward by `by`, running every callback that falls due.
    /// Returns the number of callbacks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut fired = 0;
        while let Some((deadline, callback)) = self.pop_due(Some(target)) {
            self.now.set(deadline.max(self.now.get()));
            callback();
            fired += 1;
        }
        self.now.set(target);
        fired
    }

    pub fn advance_ms(&self, ms: u64) -> usize {
        self.advance(Duration::from_millis(ms))
    }

    /// Runs callbacks until nothing is scheduled, jumping the clock to
    /// each deadline in turn.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some((deadline, callback)) = self.pop_due(None) {
            self.now.set(deadline.max(self.now.get()));
            callback();
            fired += 1;
        }
        fired
    }

    /// Number of callbacks still scheduled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.borrow().keys().next().map(|(deadline, _)| *deadline)
    }

    fn pop_due(&self, limit: Option<Duration>) -> Option<(Duration, TimeoutCallback)> {
        let mut queue = self.queue.borrow_mut();
        let key = *queue.keys().next()?;
        if limit.is_some_and(|limit| key.0 > limit) {
            return None;
        }
        let callback = queue.remove(&key)?;
        drop(queue);
        self.deadlines.borrow_mut().remove(&key.1);
        Some((key.0, callback))
    }
}

impl Clock for VirtualLoop {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl Scheduler for VirtualLoop {
    fn set_timeout(&self, delay: Duration, callback: TimeoutCallback) -> TimeoutId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let deadline = self.now.get() + delay;
        self.queue.borrow_mut().insert((deadline, id), callback);
        self.deadlines.borrow_mut().insert(id, deadline);
        TimeoutId(id)
    }

    fn clear_timeout(&self, id: TimeoutId) {
        if let Some(deadline) = self.deadlines.borrow_mut().remove(&id.0) {
            self.queue.borrow_mut().remove(&(deadline, id.0));
        }
    }
}

impl std::fmt::Debug for VirtualLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualLoop")
            .field("now", &self.now.get())
            .field("pending", &self.pending())
            .finish()
    }
}

// =============================================================================
// TokioScheduler
// =============================================================================

/// Real-time scheduler spawning one local task per timeout.
///
/// # Panics
///
/// [`Scheduler::set_timeout`] panics when called outside a `LocalSet`.
#[derive(Debug, Default)]
pub struct TokioScheduler {
    next_id: Cell<u64>,
    tasks: Rc<RefCell<HashMap<u64, AbortHandle>>>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timeouts that have neither fired nor been cleared.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Scheduler for TokioScheduler {
    fn set_timeout(&self, delay: Duration, callback: TimeoutCallback) -> TimeoutId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let tasks = Rc::clone(&self.tasks);
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            tasks.borrow_mut().remove(&id);
            callback();
        });
        self.tasks.borrow_mut().insert(id, handle.abort_handle());
        TimeoutId(id)
    }

    fn clear_timeout(&self, id: TimeoutId) {
        if let Some(handle) = self.tasks.borrow_mut().remove(&id.0) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.borrow_mut().drain() {
            handle.abort();
        }
    }
}
