//! Cancellable one-shot delayed actions.

use pagewire_host::{Scheduler, TimerHandle};

/// A one-shot delayed action with an idempotent cancel.
///
/// Cancelling before the deadline guarantees the action never runs;
/// cancelling after it fired, or twice, is a no-op. Dropping the handle
/// does not cancel - a timer whose owner goes away fires harmlessly,
/// which is what the submit-guard fallback relies on.
pub struct ScopedTimer {
    handle: TimerHandle,
}

impl ScopedTimer {
    /// Schedule `action` to run once after `delay_ms`.
    pub fn after(scheduler: &Scheduler, delay_ms: u64, action: impl FnOnce() + 'static) -> Self {
        Self {
            handle: scheduler.set_timeout(delay_ms, action),
        }
    }

    /// Cancel the pending action. Safe to call at any time.
    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// Whether the action is still scheduled.
    pub fn is_armed(&self) -> bool {
        self.handle.is_armed()
    }
}
