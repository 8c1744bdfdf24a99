// SPDX-License-Identifier: MPL-2.0
//! Reference-counted node handles.
//!
//! A [`Node`] is a cheap clone of a shared handle, the same way a script
//! holds references to DOM nodes. Parents hold their children strongly and
//! children point back to their parent weakly, so detaching a subtree frees
//! it once no handle remains.

use super::event::{Event, Listener, ListenerId};
use super::markup;
use super::DocumentId;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    document: DocumentId,
    parent: Weak<RefCell<NodeData>>,
    children: Vec<Node>,
    listeners: Vec<Listener>,
}

/// Handle to an element or text node.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    pub(crate) fn element(document: DocumentId, tag: &str) -> Self {
        Self::with_kind(
            document,
            NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
                attributes: Vec::new(),
            },
        )
    }

    pub(crate) fn text(document: DocumentId, content: &str) -> Self {
        Self::with_kind(document, NodeKind::Text(content.to_string()))
    }

    fn with_kind(document: DocumentId, kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            kind,
            document,
            parent: Weak::new(),
            children: Vec::new(),
            listeners: Vec::new(),
        })))
    }

    /// Identifier of the document that created this node.
    #[must_use]
    pub fn document_id(&self) -> DocumentId {
        self.0.borrow().document
    }

    /// Lowercase tag name, or `None` for text nodes.
    #[must_use]
    pub fn tag_name(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { tag, .. } => Some(tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Element { .. })
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Text(content) => content.clone(),
            NodeKind::Element { .. } => data.children.iter().map(Node::text_content).collect(),
        }
    }

    // ------------------------------------------------------------------
    // Attributes and classes
    // ------------------------------------------------------------------

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
            NodeKind::Text(_) => None,
        }
    }

    /// Sets an attribute, keeping its original position if it already exists.
    /// Has no effect on text nodes.
    pub fn set_attribute(&self, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.0.borrow_mut().kind {
            if let Some(slot) = attributes.iter_mut().find(|(key, _)| key == name) {
                slot.1 = value.to_string();
            } else {
                attributes.push((name.to_string(), value.to_string()));
            }
        }
    }

    pub fn remove_attribute(&self, name: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.0.borrow_mut().kind {
            attributes.retain(|(key, _)| key != name);
        }
    }

    /// The inline `style` attribute, empty when unset.
    #[must_use]
    pub fn style(&self) -> String {
        self.attribute("style").unwrap_or_default()
    }

    #[must_use]
    pub fn class_name(&self) -> String {
        self.attribute("class").unwrap_or_default()
    }

    pub fn set_class_name(&self, class_name: &str) {
        self.set_attribute("class", class_name);
    }

    #[must_use]
    pub fn class_list(&self) -> Vec<String> {
        self.class_name()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class_name().split_whitespace().any(|c| c == class)
    }

    pub fn add_class(&self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        let mut classes = self.class_list();
        classes.push(class.to_string());
        self.set_class_name(&classes.join(" "));
    }

    pub fn remove_class(&self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let classes: Vec<String> = self.class_list().into_iter().filter(|c| c != class).collect();
        self.set_class_name(&classes.join(" "));
    }

    // ------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------

    #[must_use]
    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    /// Element children, in document order.
    #[must_use]
    pub fn children(&self) -> Vec<Node> {
        self.0
            .borrow()
            .children
            .iter()
            .filter(|child| child.is_element())
            .cloned()
            .collect()
    }

    /// All child nodes, text included.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    #[must_use]
    pub fn child_element_count(&self) -> usize {
        self.0
            .borrow()
            .children
            .iter()
            .filter(|child| child.is_element())
            .count()
    }

    #[must_use]
    pub fn last_element_child(&self) -> Option<Node> {
        self.0
            .borrow()
            .children
            .iter()
            .rev()
            .find(|child| child.is_element())
            .cloned()
    }

    /// Returns true if `other` is this node or one of its descendants.
    #[must_use]
    pub fn contains(&self, other: &Node) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node == *self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Appends `child`, detaching it from any previous parent first.
    pub fn append_child(&self, child: &Node) {
        self.insert_child(child, None);
    }

    /// Inserts `child` as the first child (`afterbegin`).
    pub fn prepend_child(&self, child: &Node) {
        self.insert_child(child, Some(0));
    }

    fn insert_child(&self, child: &Node, index: Option<usize>) {
        if child.contains(self) {
            tracing::warn!("refusing to insert a node into its own subtree");
            return;
        }
        child.remove();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        let mut data = self.0.borrow_mut();
        let len = data.children.len();
        match index {
            Some(index) => data.children.insert(index.min(len), child.clone()),
            None => data.children.push(child.clone()),
        }
    }

    /// Removes `child` if it is a direct child. Returns whether it was found.
    pub fn remove_child(&self, child: &Node) -> bool {
        let removed = {
            let mut data = self.0.borrow_mut();
            let before = data.children.len();
            data.children.retain(|c| c != child);
            data.children.len() != before
        };
        if removed {
            child.0.borrow_mut().parent = Weak::new();
        }
        removed
    }

    /// Detaches this node from its parent. Detached nodes are left untouched.
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    // ------------------------------------------------------------------
    // Markup
    // ------------------------------------------------------------------

    /// Parses `markup` and appends the resulting nodes (`beforeend`).
    pub fn append_markup(&self, markup: &str) {
        for node in markup::parse_fragment(self.document_id(), markup) {
            self.append_child(&node);
        }
    }

    #[must_use]
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        markup::write_node(self, &mut out);
        out
    }

    #[must_use]
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in self.child_nodes() {
            markup::write_node(&child, &mut out);
        }
        out
    }

    pub(crate) fn with_element<R>(
        &self,
        f: impl FnOnce(Option<(&str, &[(String, String)])>) -> R,
    ) -> R {
        match &self.0.borrow().kind {
            NodeKind::Element { tag, attributes } => f(Some((tag, attributes))),
            NodeKind::Text(_) => f(None),
        }
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn add_event_listener(
        &self,
        event: &str,
        callback: impl FnMut(&Event) + 'static,
    ) -> ListenerId {
        self.push_listener(event, false, callback)
    }

    /// Registers a listener that is removed right before its first call.
    pub fn add_event_listener_once(
        &self,
        event: &str,
        callback: impl FnMut(&Event) + 'static,
    ) -> ListenerId {
        self.push_listener(event, true, callback)
    }

    fn push_listener(
        &self,
        event: &str,
        once: bool,
        callback: impl FnMut(&Event) + 'static,
    ) -> ListenerId {
        let id = ListenerId::next();
        self.0.borrow_mut().listeners.push(Listener {
            id: id.0,
            event: event.to_string(),
            once,
            callback: Rc::new(RefCell::new(callback)),
        });
        id
    }

    pub fn remove_event_listener(&self, id: ListenerId) {
        self.0.borrow_mut().listeners.retain(|l| l.id != id.0);
    }

    /// Drops every listener registered on this node.
    pub fn clear_event_listeners(&self) {
        self.0.borrow_mut().listeners.clear();
    }

    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.0
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.event == event)
            .count()
    }

    /// Delivers `event` to this node and, if it bubbles, to each ancestor.
    ///
    /// The propagation path is fixed before the first listener runs, so
    /// handlers may detach nodes without changing who receives the event.
    pub fn dispatch_event(&self, event: &Event) {
        let mut path = vec![self.clone()];
        if event.bubbles() {
            let mut current = self.parent();
            while let Some(node) = current {
                current = node.parent();
                path.push(node);
            }
        }

        for node in path {
            let listeners: Vec<Listener> = {
                let mut data = node.0.borrow_mut();
                let matching: Vec<Listener> = data
                    .listeners
                    .iter()
                    .filter(|l| l.event == event.name())
                    .cloned()
                    .collect();
                data.listeners
                    .retain(|l| !(l.once && l.event == event.name()));
                matching
            };
            for listener in listeners {
                // A listener that re-dispatches to itself is skipped rather than re-entered.
                if let Ok(mut callback) = listener.callback.try_borrow_mut() {
                    (*callback)(event);
                }
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.outer_html())
    }
}
