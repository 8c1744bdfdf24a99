// SPDX-License-Identifier: MPL-2.0
//! Event names and listener bookkeeping.

use std::cell::RefCell;
use std::rc::Rc;

pub const CLICK: &str = "click";
pub const MOUSE_ENTER: &str = "mouseenter";
pub const MOUSE_LEAVE: &str = "mouseleave";
pub const ANIMATION_END: &str = "animationend";

/// An event dispatched on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    bubbles: bool,
}

impl Event {
    /// Creates a bubbling event.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bubbles: true,
        }
    }

    /// Creates an event that is only delivered to its target.
    pub fn non_bubbling(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bubbles: false,
        }
    }

    pub fn click() -> Self {
        Self::new(CLICK)
    }

    /// Pointer entering a node. Like the browser event, it does not bubble.
    pub fn mouse_enter() -> Self {
        Self::non_bubbling(MOUSE_ENTER)
    }

    pub fn mouse_leave() -> Self {
        Self::non_bubbling(MOUSE_LEAVE)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }
}

pub(crate) type Callback = Rc<RefCell<dyn FnMut(&Event)>>;

/// A registered listener.
#[derive(Clone)]
pub(crate) struct Listener {
    pub(crate) id: u64,
    pub(crate) event: String,
    pub(crate) once: bool,
    pub(crate) callback: Callback,
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("event", &self.event)
            .field("once", &self.once)
            .finish_non_exhaustive()
    }
}

/// Identifies a listener so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    pub(crate) fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_bubbles_hover_does_not() {
        assert!(Event::click().bubbles());
        assert!(!Event::mouse_enter().bubbles());
        assert!(!Event::mouse_leave().bubbles());
    }

    #[test]
    fn listener_ids_are_unique() {
        assert_ne!(ListenerId::next(), ListenerId::next());
    }
}
