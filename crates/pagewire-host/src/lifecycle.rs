//! Page lifecycle - visibility and unload notification.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use tracing::debug;

type VisibilityListener = Box<dyn FnMut(bool)>;
type UnloadListener = Box<dyn FnMut()>;

struct Inner {
    visible: bool,
    unloaded: bool,
    visibility_listeners: Vec<VisibilityListener>,
    unload_listeners: Vec<UnloadListener>,
}

/// Tracks whether the page is the visible foreground view and whether it
/// has been torn down.
///
/// Visibility listeners are notified only on actual changes; the unload
/// notification is delivered exactly once. Cloning shares the same state.
#[derive(Clone)]
pub struct PageLifecycle {
    inner: Rc<RefCell<Inner>>,
}

impl Default for PageLifecycle {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PageLifecycle {
    /// Create a lifecycle with the given initial visibility.
    pub fn new(visible: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                visible,
                unloaded: false,
                visibility_listeners: Vec::new(),
                unload_listeners: Vec::new(),
            })),
        }
    }

    /// Whether the page is currently visible.
    pub fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }

    /// Whether the page has been unloaded.
    pub fn is_unloaded(&self) -> bool {
        self.inner.borrow().unloaded
    }

    /// Register a visibility-change listener.
    pub fn on_visibility_change(&self, listener: impl FnMut(bool) + 'static) {
        self.inner
            .borrow_mut()
            .visibility_listeners
            .push(Box::new(listener));
    }

    /// Register an unload listener.
    pub fn on_unload(&self, listener: impl FnMut() + 'static) {
        self.inner
            .borrow_mut()
            .unload_listeners
            .push(Box::new(listener));
    }

    /// Record a visibility change. Listeners run only when the flag
    /// actually flips; changes after unload are ignored.
    pub fn set_visible(&self, visible: bool) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.unloaded || inner.visible == visible {
                return;
            }
            inner.visible = visible;
        }
        debug!(visible, "page visibility changed");

        // Listeners run with no borrow held and may register more
        // listeners; additions during dispatch land at the tail.
        let mut listeners = mem::take(&mut self.inner.borrow_mut().visibility_listeners);
        for listener in &mut listeners {
            listener(visible);
        }
        let mut inner = self.inner.borrow_mut();
        let added = mem::take(&mut inner.visibility_listeners);
        inner.visibility_listeners = listeners;
        inner.visibility_listeners.extend(added);
    }

    /// Tear the page down. Unload listeners run once; later calls are
    /// no-ops.
    pub fn unload(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.unloaded {
                return;
            }
            inner.unloaded = true;
        }
        debug!("page unloading");

        let mut listeners = mem::take(&mut self.inner.borrow_mut().unload_listeners);
        for listener in &mut listeners {
            listener();
        }
        // The page is gone; listeners registered during unload are dropped.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_visibility_change_notifies_listeners() {
        let lifecycle = PageLifecycle::new(true);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = Rc::clone(&seen);
        lifecycle.on_visibility_change(move |visible| s.borrow_mut().push(visible));

        lifecycle.set_visible(false);
        lifecycle.set_visible(true);
        assert_eq!(*seen.borrow(), vec![false, true]);
    }

    #[test]
    fn test_no_notification_without_change() {
        let lifecycle = PageLifecycle::new(true);
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        lifecycle.on_visibility_change(move |_| h.set(h.get() + 1));

        lifecycle.set_visible(true);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_unload_fires_once() {
        let lifecycle = PageLifecycle::new(true);
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        lifecycle.on_unload(move || h.set(h.get() + 1));

        lifecycle.unload();
        lifecycle.unload();
        assert_eq!(hits.get(), 1);
        assert!(lifecycle.is_unloaded());
    }

    #[test]
    fn test_visibility_ignored_after_unload() {
        let lifecycle = PageLifecycle::new(true);
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        lifecycle.on_visibility_change(move |_| h.set(h.get() + 1));

        lifecycle.unload();
        lifecycle.set_visible(false);
        assert_eq!(hits.get(), 0);
        assert!(lifecycle.is_visible());
    }

    #[test]
    fn test_listener_registered_during_dispatch_kept_for_next_change() {
        let lifecycle = PageLifecycle::new(true);
        let hits = Rc::new(Cell::new(0));

        let outer = lifecycle.clone();
        let h = Rc::clone(&hits);
        lifecycle.on_visibility_change(move |_| {
            let h = Rc::clone(&h);
            outer.on_visibility_change(move |_| h.set(h.get() + 1));
        });

        lifecycle.set_visible(false);
        assert_eq!(hits.get(), 0);
        lifecycle.set_visible(true);
        assert_eq!(hits.get(), 1);
    }
}
