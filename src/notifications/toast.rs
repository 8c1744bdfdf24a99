// SPDX-License-Identifier: MPL-2.0
//! Toast elements.
//!
//! A toast owns one `div.notification` node and the timer that dismisses
//! it. Dismissal (timer expiry, close button, click, or [`Toast::dismiss`])
//! runs at most once per toast.

use super::container::ContainerRegistry;
use crate::config::{
    Animation, Message, ToastConfig, ANIMATED_CLASS, DELETE_CLASS, NOTIFICATION_CLASS,
    TOAST_PADDING,
};
use crate::dom::{Document, Node, CLICK, MOUSE_ENTER, MOUSE_LEAVE};
use crate::runtime::{Runtime, Timer};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Unique identifier for a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a toast is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Visible,
    /// Exit animation running; removal happens when it ends.
    Leaving,
    Removed,
}

struct ToastInner {
    id: ToastId,
    config: ToastConfig,
    document: Document,
    element: Node,
    close_button: RefCell<Option<Node>>,
    timer: RefCell<Option<Timer>>,
    lifecycle: Cell<Lifecycle>,
    registry: Weak<RefCell<ContainerRegistry>>,
}

/// Handle to a toast. Clones refer to the same toast.
///
/// Event listeners and the timer hold handles to the toast until it is
/// removed, so a toast stays alive on screen without the caller keeping
/// this handle.
#[derive(Clone)]
pub struct Toast {
    inner: Rc<ToastInner>,
}

impl Toast {
    /// Builds the node for `config` and starts the dismissal timer.
    /// The node is not attached anywhere yet.
    pub(crate) fn build(
        config: ToastConfig,
        document: &Document,
        runtime: &Runtime,
        registry: Weak<RefCell<ContainerRegistry>>,
    ) -> Self {
        let toast = Self {
            inner: Rc::new(ToastInner {
                id: ToastId::new(),
                element: document.create_element("div"),
                document: document.clone(),
                config,
                close_button: RefCell::new(None),
                timer: RefCell::new(None),
                lifecycle: Cell::new(Lifecycle::Visible),
                registry,
            }),
        };
        toast.build_element();
        toast.start_timer(runtime);
        toast
    }

    fn build_element(&self) {
        let config = &self.inner.config;
        let element = &self.inner.element;

        let mut classes = vec![NOTIFICATION_CLASS.to_string()];
        classes.extend(config.extra_classes.split_whitespace().map(str::to_string));
        let mut style = format!(
            "width:auto;pointer-events:auto;display:inline-flex;white-space:pre-wrap;opacity:{};",
            config.opacity
        );

        if let Some(animation) = &config.animate {
            if let Some(entrance) = animation.entrance_class() {
                classes.push(ANIMATED_CLASS.to_string());
                classes.push(entrance.clone());
                classes.push(animation.speed_class());
                match self.inner.document.animation_end_event() {
                    Some(event) => {
                        let node = element.clone();
                        element.add_event_listener_once(event, move |_| node.remove_class(&entrance));
                    }
                    None => tracing::debug!(
                        toast = ?self.inner.id,
                        "document has no animation support, entrance class kept"
                    ),
                }
            }
        }

        if config.dismissible {
            let close = self.inner.document.create_element("button");
            close.set_class_name(DELETE_CLASS);
            let toast = self.clone();
            close.add_event_listener(CLICK, move |_| toast.dismiss());
            element.prepend_child(&close);
            *self.inner.close_button.borrow_mut() = Some(close);
        } else {
            style.push_str(&format!("padding: {TOAST_PADDING};"));
        }

        if config.close_on_click {
            let toast = self.clone();
            element.add_event_listener(CLICK, move |_| toast.dismiss());
        }

        element.set_class_name(&classes.join(" "));
        element.set_attribute("style", &style);

        match &config.message {
            Message::Markup(markup) => element.append_markup(markup),
            Message::Node(node) => element.append_child(node),
        }
    }

    fn start_timer(&self, runtime: &Runtime) {
        let toast = self.clone();
        let timer = Timer::start(runtime.clone(), self.inner.config.duration, move || {
            toast.dismiss();
        });
        *self.inner.timer.borrow_mut() = Some(timer);

        if self.inner.config.pause_on_hover {
            let toast = self.clone();
            self.inner.element.add_event_listener(MOUSE_ENTER, move |_| {
                if let Some(timer) = toast.inner.timer.borrow().as_ref() {
                    timer.pause();
                }
            });
            let toast = self.clone();
            self.inner.element.add_event_listener(MOUSE_LEAVE, move |_| {
                if let Some(timer) = toast.inner.timer.borrow().as_ref() {
                    timer.resume();
                }
            });
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.inner.id
    }

    /// The toast's `div.notification` node.
    #[must_use]
    pub fn element(&self) -> Node {
        self.inner.element.clone()
    }

    #[must_use]
    pub fn config(&self) -> &ToastConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.lifecycle.get()
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.lifecycle() == Lifecycle::Removed
    }

    /// Dismissal budget left as of the last hover pause, `None` once removed.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.inner.timer.borrow().as_ref().map(Timer::remaining)
    }

    /// Starts removing the toast. Repeated calls are ignored.
    ///
    /// With an exit animation the node gets the exit class and is removed
    /// when the animation ends; otherwise it is removed right away.
    pub fn dismiss(&self) {
        if self.inner.lifecycle.get() != Lifecycle::Visible {
            return;
        }

        let exit = self
            .inner
            .config
            .animate
            .as_ref()
            .and_then(Animation::exit_class);
        let Some(exit) = exit else {
            self.finish();
            return;
        };
        let Some(event) = self.inner.document.animation_end_event() else {
            tracing::debug!(toast = ?self.inner.id, "document has no animation support, skipping exit animation");
            self.finish();
            return;
        };
        // A detached node never plays its exit animation.
        if self.inner.element.parent().is_none() {
            self.finish();
            return;
        }

        self.inner.lifecycle.set(Lifecycle::Leaving);
        if let Some(timer) = self.inner.timer.borrow().as_ref() {
            timer.cancel();
        }
        self.inner.element.add_class(&exit);
        let toast = self.clone();
        self.inner
            .element
            .add_event_listener_once(event, move |_| toast.finish());
        tracing::debug!(toast = ?self.inner.id, class = %exit, "toast leaving");
    }

    /// Removes the toast at once, skipping any exit animation and leaving
    /// its container in place.
    pub(crate) fn discard(&self) {
        self.inner.element.remove();
        self.finish();
    }

    /// Removes the node, and its container if this was the last toast in it.
    fn finish(&self) {
        if self.inner.lifecycle.replace(Lifecycle::Removed) == Lifecycle::Removed {
            return;
        }

        // Listeners and the timer hold handles to this toast; dropping them
        // releases it.
        let timer = self.inner.timer.borrow_mut().take();
        drop(timer);
        self.inner.element.clear_event_listeners();
        if let Some(close) = self.inner.close_button.borrow_mut().take() {
            close.clear_event_listeners();
        }

        let registry = self.inner.registry.upgrade();
        if let Some(registry) = &registry {
            registry.borrow_mut().untrack(self.inner.config.position, self.inner.id);
        }

        let element = &self.inner.element;
        if let Some(container) = element.parent() {
            if container.child_element_count() <= 1 {
                container.remove();
                if let Some(registry) = &registry {
                    registry.borrow_mut().forget(&container);
                }
                tracing::debug!(toast = ?self.inner.id, "toast container removed");
            }
        }
        element.remove();
        tracing::debug!(toast = ?self.inner.id, "toast removed");
    }
}

impl std::fmt::Debug for Toast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toast")
            .field("id", &self.inner.id)
            .field("lifecycle", &self.inner.lifecycle.get())
            .finish_non_exhaustive()
    }
}
