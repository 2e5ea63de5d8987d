//! Element nodes - shared handles into the page tree.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::event::{Event, EventKind};

type Listener = Rc<RefCell<Box<dyn FnMut(&Event)>>>;

struct NodeData {
    tag: String,
    id: Option<String>,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    text: String,
    value: String,
    disabled: bool,
    hidden: bool,
    parent: Weak<RefCell<NodeData>>,
    children: Vec<Element>,
    listeners: HashMap<EventKind, Vec<Listener>>,
}

/// A shared handle to one element in the tree.
///
/// Cloning an `Element` clones the handle, not the node; all clones
/// observe the same state. Identity comparisons use [`Element::same_node`].
#[derive(Clone)]
pub struct Element {
    node: Rc<RefCell<NodeData>>,
}

impl Element {
    /// Create a detached element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            node: Rc::new(RefCell::new(NodeData {
                tag: tag.into(),
                id: None,
                attributes: BTreeMap::new(),
                classes: BTreeSet::new(),
                text: String::new(),
                value: String::new(),
                disabled: false,
                hidden: false,
                parent: Weak::new(),
                children: Vec::new(),
                listeners: HashMap::new(),
            })),
        }
    }

    /// Whether two handles refer to the same node.
    pub fn same_node(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    /// The element's tag name.
    pub fn tag(&self) -> String {
        self.node.borrow().tag.clone()
    }

    /// The element's id, if any.
    pub fn id(&self) -> Option<String> {
        self.node.borrow().id.clone()
    }

    /// Set the element's id.
    pub fn set_id(&self, id: impl Into<String>) {
        self.node.borrow_mut().id = Some(id.into());
    }

    /// Read an attribute value.
    pub fn attr(&self, name: &str) -> Option<String> {
        self.node.borrow().attributes.get(name).cloned()
    }

    /// Whether an attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.node.borrow().attributes.contains_key(name)
    }

    /// Set an attribute value.
    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<String>) {
        self.node
            .borrow_mut()
            .attributes
            .insert(name.into(), value.into());
    }

    /// Remove an attribute. No-op when absent.
    pub fn remove_attr(&self, name: &str) {
        self.node.borrow_mut().attributes.remove(name);
    }

    /// Add a class to the class list.
    pub fn add_class(&self, class: impl Into<String>) {
        self.node.borrow_mut().classes.insert(class.into());
    }

    /// Remove a class from the class list. No-op when absent.
    pub fn remove_class(&self, class: &str) {
        self.node.borrow_mut().classes.remove(class);
    }

    /// Whether the class list contains the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.node.borrow().classes.contains(class)
    }

    /// The element's text content.
    pub fn text(&self) -> String {
        self.node.borrow().text.clone()
    }

    /// Replace the element's text content.
    pub fn set_text(&self, text: impl Into<String>) {
        self.node.borrow_mut().text = text.into();
    }

    /// The form-control value.
    pub fn value(&self) -> String {
        self.node.borrow().value.clone()
    }

    /// Set the form-control value.
    ///
    /// Does not dispatch an input event; callers that simulate typing
    /// dispatch [`EventKind::Input`] themselves, as a host would.
    pub fn set_value(&self, value: impl Into<String>) {
        self.node.borrow_mut().value = value.into();
    }

    /// Whether the control is disabled.
    pub fn disabled(&self) -> bool {
        self.node.borrow().disabled
    }

    /// Enable or disable the control.
    pub fn set_disabled(&self, disabled: bool) {
        self.node.borrow_mut().disabled = disabled;
    }

    /// Whether the element is hidden from display.
    pub fn hidden(&self) -> bool {
        self.node.borrow().hidden
    }

    /// Show or hide the element.
    pub fn set_hidden(&self, hidden: bool) {
        self.node.borrow_mut().hidden = hidden;
    }

    /// Append a child element, detaching it from any previous parent.
    pub fn append_child(&self, child: &Element) {
        child.remove();
        child.node.borrow_mut().parent = Rc::downgrade(&self.node);
        self.node.borrow_mut().children.push(child.clone());
    }

    /// Insert a child element at the given index (clamped to the child
    /// count), detaching it from any previous parent.
    pub fn insert_child(&self, index: usize, child: &Element) {
        child.remove();
        child.node.borrow_mut().parent = Rc::downgrade(&self.node);
        let mut node = self.node.borrow_mut();
        let index = index.min(node.children.len());
        node.children.insert(index, child.clone());
    }

    /// Detach this element from its parent. No-op when detached.
    pub fn remove(&self) {
        let parent = self.node.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(&c.node, &self.node));
        }
        self.node.borrow_mut().parent = Weak::new();
    }

    /// The parent element, if attached.
    pub fn parent(&self) -> Option<Element> {
        self.node
            .borrow()
            .parent
            .upgrade()
            .map(|node| Element { node })
    }

    /// Direct children, in document order.
    pub fn children(&self) -> Vec<Element> {
        self.node.borrow().children.clone()
    }

    /// All descendants in depth-first document order, excluding self.
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        let mut stack: Vec<Element> = self.children();
        stack.reverse();
        while let Some(el) = stack.pop() {
            out.push(el.clone());
            let mut kids = el.children();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// Walk up the ancestor chain (including self) until the predicate
    /// matches.
    pub fn closest(&self, mut pred: impl FnMut(&Element) -> bool) -> Option<Element> {
        let mut current = Some(self.clone());
        while let Some(el) = current {
            if pred(&el) {
                return Some(el);
            }
            current = el.parent();
        }
        None
    }

    /// Register a listener for the given event kind.
    pub fn add_listener(&self, kind: EventKind, listener: impl FnMut(&Event) + 'static) {
        self.node
            .borrow_mut()
            .listeners
            .entry(kind)
            .or_default()
            .push(Rc::new(RefCell::new(Box::new(listener))));
    }

    /// Whether any listener is registered for the given event kind.
    pub fn has_listener(&self, kind: EventKind) -> bool {
        self.node
            .borrow()
            .listeners
            .get(&kind)
            .is_some_and(|ls| !ls.is_empty())
    }

    /// Dispatch an event to this element's listeners.
    ///
    /// Listeners run in registration order, each to completion, and may
    /// mutate the tree or register further listeners. The returned event
    /// carries the `default_prevented` flag.
    pub fn dispatch(&self, kind: EventKind) -> Event {
        let event = Event::new(kind);
        // Snapshot the listener list so handlers can mutate the node
        // without holding a borrow across the call.
        let listeners: Vec<Listener> = self
            .node
            .borrow()
            .listeners
            .get(&kind)
            .cloned()
            .unwrap_or_default();
        trace!(?kind, count = listeners.len(), "dispatching event");
        for listener in listeners {
            (listener.borrow_mut())(&event);
        }
        event
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.node.borrow();
        f.debug_struct("Element")
            .field("tag", &node.tag)
            .field("id", &node.id)
            .field("classes", &node.classes)
            .field("children", &node.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_attributes_and_classes() {
        let el = Element::new("textarea");
        el.set_attr("maxlength", "100");
        assert_eq!(el.attr("maxlength").as_deref(), Some("100"));
        assert!(el.has_attr("maxlength"));

        el.add_class("alert");
        el.add_class("alert");
        assert!(el.has_class("alert"));
        el.remove_class("alert");
        assert!(!el.has_class("alert"));
    }

    #[test]
    fn test_append_and_remove_child() {
        let parent = Element::new("div");
        let child = Element::new("span");
        parent.append_child(&child);

        assert_eq!(parent.children().len(), 1);
        assert!(child.parent().unwrap().same_node(&parent));

        child.remove();
        assert!(parent.children().is_empty());
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_append_reparents() {
        let first = Element::new("div");
        let second = Element::new("div");
        let child = Element::new("span");

        first.append_child(&child);
        second.append_child(&child);

        assert!(first.children().is_empty());
        assert_eq!(second.children().len(), 1);
    }

    #[test]
    fn test_insert_child_at_front() {
        let parent = Element::new("div");
        let a = Element::new("p");
        let b = Element::new("p");
        parent.append_child(&a);
        parent.insert_child(0, &b);

        assert!(parent.children()[0].same_node(&b));
        assert!(parent.children()[1].same_node(&a));
    }

    #[test]
    fn test_descendants_depth_first() {
        let root = Element::new("body");
        let section = Element::new("section");
        let leaf = Element::new("span");
        root.append_child(&section);
        section.append_child(&leaf);

        let all = root.descendants();
        assert_eq!(all.len(), 2);
        assert!(all[0].same_node(&section));
        assert!(all[1].same_node(&leaf));
    }

    #[test]
    fn test_closest_finds_ancestor() {
        let form = Element::new("form");
        let fieldset = Element::new("fieldset");
        let button = Element::new("button");
        form.append_child(&fieldset);
        fieldset.append_child(&button);

        let found = button.closest(|el| el.tag() == "form").unwrap();
        assert!(found.same_node(&form));
        assert!(button.closest(|el| el.tag() == "table").is_none());
    }

    #[test]
    fn test_dispatch_runs_listeners_in_order() {
        let el = Element::new("a");
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = Rc::clone(&order);
        el.add_listener(EventKind::Click, move |_| o.borrow_mut().push(1));
        let o = Rc::clone(&order);
        el.add_listener(EventKind::Click, move |event| {
            o.borrow_mut().push(2);
            event.prevent_default();
        });

        let event = el.dispatch(EventKind::Click);
        assert_eq!(*order.borrow(), vec![1, 2]);
        assert!(event.default_prevented());
    }

    #[test]
    fn test_listener_may_mutate_tree_during_dispatch() {
        let parent = Element::new("div");
        let el = Element::new("div");
        parent.append_child(&el);

        let target = el.clone();
        el.add_listener(EventKind::Click, move |_| target.remove());

        el.dispatch(EventKind::Click);
        assert!(parent.children().is_empty());
    }

    #[test]
    fn test_dispatch_without_listeners_is_noop() {
        let el = Element::new("div");
        let event = el.dispatch(EventKind::Submit);
        assert!(!event.default_prevented());
    }

    #[test]
    fn test_disabled_and_hidden_flags() {
        let el = Element::new("button");
        assert!(!el.disabled());
        el.set_disabled(true);
        assert!(el.disabled());

        assert!(!el.hidden());
        el.set_hidden(true);
        assert!(el.hidden());
    }

    #[test]
    fn test_same_listener_not_invoked_after_removal_of_element() {
        // Removing an element detaches it from the tree but keeps its
        // listeners; dispatch on a detached node still works.
        let el = Element::new("div");
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        el.add_listener(EventKind::Click, move |_| h.set(h.get() + 1));
        el.remove();
        el.dispatch(EventKind::Click);
        assert_eq!(hits.get(), 1);
    }
}
