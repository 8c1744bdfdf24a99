// SPDX-License-Identifier: MPL-2.0
//! Public entry point for showing toasts.

use super::container::ContainerRegistry;
use super::toast::Toast;
use crate::config::{Position, ToastConfig, ToastOptions};
use crate::dom::{Document, Node};
use crate::error::Result;
use crate::runtime::Runtime;
use std::cell::RefCell;
use std::rc::Rc;

/// Owns the active defaults, the target document and its containers.
///
/// Each service is independent: two services on the same document keep
/// separate containers and defaults.
pub struct ToastService {
    defaults: ToastOptions,
    document: Document,
    runtime: Runtime,
    registry: Rc<RefCell<ContainerRegistry>>,
}

impl ToastService {
    #[must_use]
    pub fn new(document: Document, runtime: Runtime) -> Self {
        Self {
            defaults: ToastOptions::builtin(),
            document,
            runtime,
            registry: Rc::new(RefCell::new(ContainerRegistry::new())),
        }
    }

    /// Shows a toast built from `options` merged over the active defaults.
    ///
    /// The container for the toast's position is created on first use and
    /// appended to `append_to` (or the document body). In single mode every
    /// toast already in that container is removed first, without animation,
    /// even one whose exit animation is still running.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMessage`](crate::error::Error::MissingMessage)
    /// when `options` carries no message.
    pub fn toast(&self, options: ToastOptions) -> Result<Toast> {
        let merged = self.defaults.merge(&options);
        let config = ToastConfig::resolve(&merged)?;

        let mount = config
            .append_to
            .clone()
            .unwrap_or_else(|| self.document.body());
        let position = config.position;
        let offsets = config.offsets;
        let single = config.single;

        let toast = Toast::build(
            config,
            &self.document,
            &self.runtime,
            Rc::downgrade(&self.registry),
        );
        if single {
            let replaced = self.registry.borrow_mut().take_toasts(position);
            for old in replaced {
                old.discard();
            }
        }

        let container =
            self.registry
                .borrow_mut()
                .get_or_create(&self.document, &mount, position, offsets);
        if single {
            while let Some(child) = container.last_element_child() {
                container.remove_child(&child);
            }
        }

        container.append_child(&toast.element());
        self.registry.borrow_mut().track(position, &toast);
        tracing::debug!(toast = ?toast.id(), %position, single, "toast shown");
        Ok(toast)
    }

    /// Replaces the active defaults with the built-in defaults overridden by
    /// `partial`. Earlier calls have no lasting effect.
    pub fn set_defaults(&mut self, partial: ToastOptions) {
        self.defaults = ToastOptions::builtin().merge(&partial);
    }

    pub fn reset_defaults(&mut self) {
        self.defaults = ToastOptions::builtin();
    }

    /// Removes every container this service created, along with the toasts
    /// in them, and renders future toasts into `document` instead.
    pub fn set_doc(&mut self, document: Document) {
        let containers = self.registry.borrow().len();
        let toasts = self.registry.borrow_mut().clear();
        let removed = toasts.len();
        for toast in toasts {
            toast.discard();
        }
        tracing::debug!(containers, removed, document = ?document.id(), "toast document replaced");
        self.document = document;
    }

    #[must_use]
    pub fn defaults(&self) -> &ToastOptions {
        &self.defaults
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The live container for `position`, if any toast is showing there.
    #[must_use]
    pub fn container(&self, position: Position) -> Option<Node> {
        self.registry.borrow().get(position)
    }

    #[must_use]
    pub fn container_count(&self) -> usize {
        self.registry.borrow().len()
    }
}

impl std::fmt::Debug for ToastService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastService")
            .field("defaults", &self.defaults)
            .field("document", &self.document)
            .field("containers", &self.container_count())
            .finish_non_exhaustive()
    }
}
