// SPDX-License-Identifier: MPL-2.0
//! Retained document model that toasts are rendered into.
//!
//! This is the subset of a browser DOM the notification component needs:
//! element creation, attributes and class lists, child lists, event
//! listeners with bubbling, markup insertion and HTML serialization.
//!
//! # Components
//!
//! - [`Document`] - owner of a `<body>` root and of the rendering capabilities
//! - [`Node`] - shared handle to an element or text node
//! - [`Event`] - named event delivered through [`Node::dispatch_event`]

mod event;
mod markup;
mod node;

pub use event::{Event, ListenerId, ANIMATION_END, CLICK, MOUSE_ENTER, MOUSE_LEAVE};
pub use node::Node;

use std::fmt;
use std::rc::Rc;

/// Style properties probed for animation support, paired with the
/// completion event each rendering engine fires. Order is priority order.
const ANIMATION_EVENTS: [(&str, &str); 4] = [
    ("animation", ANIMATION_END),
    ("OAnimation", "oAnimationEnd"),
    ("MozAnimation", "mozAnimationEnd"),
    ("WebkitAnimation", "webkitAnimationEnd"),
];

/// Unique identifier for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

struct DocumentInner {
    id: DocumentId,
    body: Node,
    style_properties: Vec<String>,
}

/// Handle to a document. Clones refer to the same document.
#[derive(Clone)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

impl Document {
    /// Creates a document whose engine supports standard CSS animations.
    #[must_use]
    pub fn new() -> Self {
        Self::with_style_properties(["animation"])
    }

    /// Creates a document that reports support for exactly the given
    /// style properties. An empty list models an engine without animations.
    pub fn with_style_properties<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = DocumentId::new();
        Self {
            inner: Rc::new(DocumentInner {
                id,
                body: Node::element(id, "body"),
                style_properties: properties.into_iter().map(Into::into).collect(),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.inner.id
    }

    #[must_use]
    pub fn body(&self) -> Node {
        self.inner.body.clone()
    }

    #[must_use]
    pub fn create_element(&self, tag: &str) -> Node {
        Node::element(self.inner.id, tag)
    }

    #[must_use]
    pub fn create_text_node(&self, content: &str) -> Node {
        Node::text(self.inner.id, content)
    }

    /// Returns true if `node` is attached under this document's body.
    #[must_use]
    pub fn contains(&self, node: &Node) -> bool {
        self.inner.body.contains(node)
    }

    #[must_use]
    pub fn supports_style_property(&self, property: &str) -> bool {
        self.inner.style_properties.iter().any(|p| p == property)
    }

    /// Name of the animation completion event this engine fires, if any.
    #[must_use]
    pub fn animation_end_event(&self) -> Option<&'static str> {
        ANIMATION_EVENTS
            .iter()
            .find(|(property, _)| self.supports_style_property(property))
            .map(|(_, event)| *event)
    }

    /// Serialized `<body>` subtree.
    #[must_use]
    pub fn body_html(&self) -> String {
        self.inner.body.outer_html()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Document {}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.inner.id)
            .field("style_properties", &self.inner.style_properties)
            .finish_non_exhaustive()
    }
}
