//! Visibility-gated periodic refresh.

use std::cell::RefCell;
use std::rc::Rc;

use pagewire_host::{PageLifecycle, Scheduler, TimerHandle};
use tracing::debug;

type PollAction = Rc<RefCell<Box<dyn FnMut()>>>;

struct PollerInner {
    scheduler: Scheduler,
    lifecycle: PageLifecycle,
    interval_ms: u64,
    action: PollAction,
    handle: Option<TimerHandle>,
}

/// Runs a recurring action on a fixed period, but only while the page is
/// the visible foreground view.
///
/// Construction arms the schedule immediately and subscribes to the page
/// lifecycle: hiding the page stops the poller, showing it starts it
/// again, and unload stops it unconditionally. At most one schedule is
/// armed at any time; `start` on a running poller and `stop` on a
/// stopped one are no-ops. A tick that races a visibility flip checks
/// the flag at tick time and skips silently.
pub struct VisibilityGatedPoller {
    inner: Rc<RefCell<PollerInner>>,
}

impl VisibilityGatedPoller {
    /// Create a poller and start it.
    pub fn new(
        scheduler: &Scheduler,
        lifecycle: &PageLifecycle,
        interval_ms: u64,
        action: impl FnMut() + 'static,
    ) -> Self {
        let poller = Self {
            inner: Rc::new(RefCell::new(PollerInner {
                scheduler: scheduler.clone(),
                lifecycle: lifecycle.clone(),
                interval_ms,
                action: Rc::new(RefCell::new(Box::new(action))),
                handle: None,
            })),
        };
        poller.bind();
        poller.start();
        poller
    }

    // The lifecycle listeners hold the poller state strongly: the page
    // teardown path must still reach stop() after the caller drops its
    // handle, and the lifecycle itself dies with the page.
    fn bind(&self) {
        let lifecycle = self.inner.borrow().lifecycle.clone();

        let inner = Rc::clone(&self.inner);
        lifecycle.on_visibility_change(move |visible| {
            let poller = Self {
                inner: Rc::clone(&inner),
            };
            if visible {
                poller.start();
            } else {
                poller.stop();
            }
        });

        let inner = Rc::clone(&self.inner);
        lifecycle.on_unload(move || {
            Self {
                inner: Rc::clone(&inner),
            }
            .stop();
        });
    }

    /// Arm the recurring schedule. No-op while already running.
    pub fn start(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.handle.is_some() {
            return;
        }
        let lifecycle = inner.lifecycle.clone();
        let action = Rc::clone(&inner.action);
        let handle = inner.scheduler.set_interval(inner.interval_ms, move || {
            // A tick landing after the page was hidden is skipped; the
            // schedule itself is untouched.
            if lifecycle.is_visible() {
                (action.borrow_mut())();
            }
        });
        inner.handle = Some(handle);
        debug!(interval_ms = inner.interval_ms, "poller armed");
    }

    /// Disarm the schedule. Idempotent.
    pub fn stop(&self) {
        if let Some(handle) = self.inner.borrow_mut().handle.take() {
            handle.cancel();
            debug!("poller disarmed");
        }
    }

    /// Whether the recurring schedule is currently armed.
    pub fn is_running(&self) -> bool {
        self.inner.borrow().handle.is_some()
    }
}
