// SPDX-License-Identifier: MPL-2.0
//! Positioned toast containers.
//!
//! Each screen position gets at most one container, created the first time
//! a toast targets it and removed again by the last toast leaving it.

use super::toast::{Toast, ToastId};
use crate::config::{Offsets, Position, CONTAINER_PADDING_PX, CONTAINER_Z_INDEX};
use crate::dom::{Document, Node};
use std::collections::HashMap;

/// Placement rule for a container at `position`.
///
/// `Center` ignores the offsets and centers on both axes; `Unplaced`
/// yields no rule at all.
#[must_use]
pub fn placement_style(position: Position, offsets: Offsets) -> String {
    let Offsets {
        top,
        bottom,
        left,
        right,
    } = offsets;
    match position {
        Position::TopLeft => {
            format!("left:{left}px;top:{top}px;text-align:left;align-items:flex-start;")
        }
        Position::TopRight => {
            format!("right:{right}px;top:{top}px;text-align:right;align-items:flex-end;")
        }
        Position::TopCenter => {
            format!("top:{top}px;left:0;right:0;text-align:center;align-items:center;")
        }
        Position::BottomLeft => {
            format!("left:{left}px;bottom:{bottom}px;text-align:left;align-items:flex-start;")
        }
        Position::BottomRight => {
            format!("right:{right}px;bottom:{bottom}px;text-align:right;align-items:flex-end;")
        }
        Position::BottomCenter => {
            format!("bottom:{bottom}px;left:0;right:0;text-align:center;align-items:center;")
        }
        Position::Center => {
            "top:0;left:0;right:0;bottom:0;flex-flow:column;justify-content:center;align-items:center;"
                .to_string()
        }
        Position::Unplaced => String::new(),
    }
}

/// Full inline style of a container. Containers ignore the pointer so that
/// only the toasts inside them are interactive.
#[must_use]
pub fn container_style(position: Position, offsets: Offsets) -> String {
    format!(
        "width:100%;z-index:{CONTAINER_Z_INDEX};position:fixed;pointer-events:none;display:flex;\
         flex-direction:column;padding:{CONTAINER_PADDING_PX}px;{}",
        placement_style(position, offsets)
    )
}

#[derive(Debug)]
struct Slot {
    container: Node,
    toasts: Vec<Toast>,
}

/// Tracks the live container for each position and the toasts shown in it.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
    containers: HashMap<Position, Slot>,
}

impl ContainerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, position: Position) -> Option<Node> {
        self.containers
            .get(&position)
            .map(|slot| slot.container.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Returns the container tracked for `position`, creating and mounting
    /// one under `mount` if there is none.
    pub fn get_or_create(
        &mut self,
        document: &Document,
        mount: &Node,
        position: Position,
        offsets: Offsets,
    ) -> Node {
        if let Some(slot) = self.containers.get(&position) {
            return slot.container.clone();
        }

        let container = document.create_element("div");
        container.set_attribute("style", &container_style(position, offsets));
        mount.append_child(&container);
        self.containers.insert(
            position,
            Slot {
                container: container.clone(),
                toasts: Vec::new(),
            },
        );
        tracing::debug!(%position, "toast container created");
        container
    }

    /// Stops tracking `container`. Returns whether it was tracked.
    pub fn forget(&mut self, container: &Node) -> bool {
        let before = self.containers.len();
        self.containers.retain(|_, slot| slot.container != *container);
        self.containers.len() != before
    }

    /// Detaches every tracked container and forgets them all.
    /// Returns the toasts that were still shown in them.
    pub fn clear(&mut self) -> Vec<Toast> {
        let mut toasts = Vec::new();
        for (_, slot) in self.containers.drain() {
            slot.container.remove();
            toasts.extend(slot.toasts);
        }
        toasts
    }

    /// Records `toast` as shown in the container at `position`.
    pub(crate) fn track(&mut self, position: Position, toast: &Toast) {
        if let Some(slot) = self.containers.get_mut(&position) {
            slot.toasts.push(toast.clone());
        }
    }

    pub(crate) fn untrack(&mut self, position: Position, id: ToastId) {
        if let Some(slot) = self.containers.get_mut(&position) {
            slot.toasts.retain(|toast| toast.id() != id);
        }
    }

    /// Stops tracking every toast at `position` and returns them.
    pub(crate) fn take_toasts(&mut self, position: Position) -> Vec<Toast> {
        self.containers
            .get_mut(&position)
            .map(|slot| std::mem::take(&mut slot.toasts))
            .unwrap_or_default()
    }
}
