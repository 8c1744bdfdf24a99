// SPDX-License-Identifier: MPL-2.0
//! Time and scheduling seams.
//!
//! Everything that waits goes through a [`Runtime`], which pairs a
//! [`Clock`] with a [`Scheduler`]. Production code uses
//! [`Runtime::tokio`]; tests and the preview binary drive a
//! [`VirtualLoop`] by hand.

mod clock;
mod scheduler;
mod timer;

pub use clock::{Clock, SystemClock};
pub use scheduler::{Scheduler, TimeoutCallback, TimeoutId, TokioScheduler, VirtualLoop};
pub use timer::Timer;

use std::rc::Rc;
use std::time::Duration;

/// A clock and a scheduler that agree on the passage of time.
#[derive(Clone)]
pub struct Runtime {
    clock: Rc<dyn Clock>,
    scheduler: Rc<dyn Scheduler>,
}

impl Runtime {
    pub fn new(clock: Rc<dyn Clock>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self { clock, scheduler }
    }

    /// Real time on the current tokio `LocalSet`.
    #[must_use]
    pub fn tokio() -> Self {
        Self::new(Rc::new(SystemClock::new()), Rc::new(TokioScheduler::new()))
    }

    /// Virtual time owned by `event_loop`.
    #[must_use]
    pub fn from_virtual(event_loop: &Rc<VirtualLoop>) -> Self {
        Self::new(
            Rc::clone(event_loop) as Rc<dyn Clock>,
            Rc::clone(event_loop) as Rc<dyn Scheduler>,
        )
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn set_timeout(&self, delay: Duration, callback: TimeoutCallback) -> TimeoutId {
        self.scheduler.set_timeout(delay, callback)
    }

    pub fn clear_timeout(&self, id: TimeoutId) {
        self.scheduler.clear_timeout(id);
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}
