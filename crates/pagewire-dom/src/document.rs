//! The document - root of the element tree plus focus and selection.

use std::cell::RefCell;
use std::rc::Rc;

use crate::element::Element;

struct DocumentInner {
    body: Element,
    focused: RefCell<Option<Element>>,
    selected: RefCell<Option<Element>>,
}

/// A page document.
///
/// Owns the body element and tracks which element currently holds input
/// focus and which holds the active text selection. Cloning a `Document`
/// clones the handle.
#[derive(Clone)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with a `body` root.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(DocumentInner {
                body: Element::new("body"),
                focused: RefCell::new(None),
                selected: RefCell::new(None),
            }),
        }
    }

    /// The body element.
    pub fn body(&self) -> Element {
        self.inner.body.clone()
    }

    /// Find the element with the given id, if any.
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.query(|el| el.id().as_deref() == Some(id))
            .into_iter()
            .next()
    }

    /// All elements (in document order) matching the predicate.
    pub fn query(&self, mut pred: impl FnMut(&Element) -> bool) -> Vec<Element> {
        self.inner
            .body
            .descendants()
            .into_iter()
            .filter(|el| pred(el))
            .collect()
    }

    /// Give input focus to an element.
    pub fn focus(&self, el: &Element) {
        *self.inner.focused.borrow_mut() = Some(el.clone());
    }

    /// The element holding input focus, if any.
    pub fn focused(&self) -> Option<Element> {
        self.inner.focused.borrow().clone()
    }

    /// Select the full contents of an element's value.
    pub fn select_all(&self, el: &Element) {
        *self.inner.selected.borrow_mut() = Some(el.clone());
    }

    /// The text of the active selection, if any.
    pub fn selection_text(&self) -> Option<String> {
        self.inner.selected.borrow().as_ref().map(Element::value)
    }

    /// Drop focus and selection if they point at the given element.
    ///
    /// Called after a transient element is removed so the document does
    /// not keep a detached node alive through focus state.
    pub fn release(&self, el: &Element) {
        let mut focused = self.inner.focused.borrow_mut();
        if focused.as_ref().is_some_and(|f| f.same_node(el)) {
            *focused = None;
        }
        drop(focused);
        let mut selected = self.inner.selected.borrow_mut();
        if selected.as_ref().is_some_and(|s| s.same_node(el)) {
            *selected = None;
        }
    }

    /// Total number of elements attached under the body.
    pub fn node_count(&self) -> usize {
        self.inner.body.descendants().len()
    }
}
