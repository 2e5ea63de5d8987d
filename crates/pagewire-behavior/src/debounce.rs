//! Debounced invocation - a burst of calls collapses into one trailing
//! call.

use std::cell::RefCell;
use std::rc::Rc;

use pagewire_host::{Scheduler, TimerHandle};

type Action<T> = Rc<RefCell<Box<dyn FnMut(T)>>>;

/// Wraps an action so rapid repeated calls collapse into one delayed
/// trailing call.
///
/// Each [`Debouncer::call`] cancels any pending scheduled invocation and
/// reschedules with the latest argument; only the most recent call's
/// argument is ever used. The action always runs asynchronously relative
/// to the call site, via the host task queue.
pub struct Debouncer<T> {
    scheduler: Scheduler,
    wait_ms: u64,
    action: Action<T>,
    pending: Rc<RefCell<Option<TimerHandle>>>,
}

impl<T: 'static> Debouncer<T> {
    /// Wrap `action` with a quiescence window of `wait_ms`.
    pub fn new(scheduler: &Scheduler, wait_ms: u64, action: impl FnMut(T) + 'static) -> Self {
        Self {
            scheduler: scheduler.clone(),
            wait_ms,
            action: Rc::new(RefCell::new(Box::new(action))),
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Schedule the action with `arg`, superseding any pending call.
    pub fn call(&self, arg: T) {
        if let Some(handle) = self.pending.borrow_mut().take() {
            handle.cancel();
        }
        let action = Rc::clone(&self.action);
        let pending = Rc::clone(&self.pending);
        let handle = self.scheduler.set_timeout(self.wait_ms, move || {
            pending.borrow_mut().take();
            (action.borrow_mut())(arg);
        });
        *self.pending.borrow_mut() = Some(handle);
    }

    /// Whether a call is scheduled but has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

/// Build a debounced callable around `action`.
///
/// The counterpart of the page-global `debounce` utility: other page
/// scripts get a plain closure instead of the [`Debouncer`] handle.
pub fn debounce<T: 'static>(
    scheduler: &Scheduler,
    wait_ms: u64,
    action: impl FnMut(T) + 'static,
) -> impl Fn(T) {
    let debouncer = Debouncer::new(scheduler, wait_ms, action);
    move |arg| debouncer.call(arg)
}
