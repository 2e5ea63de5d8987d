//! Single-threaded run-to-completion task queue.
//!
//! Models the host environment's timer facility: one-shot delayed tasks
//! and fixed-period recurring tasks, each cancellable through an
//! idempotent [`TimerHandle`]. Time is virtual; [`Scheduler::advance`]
//! moves the clock forward and runs every task that falls due, in
//! deadline order, each to completion before the next begins.
//!
//! Callbacks may schedule new tasks and cancel existing ones freely,
//! including their own handle: a recurring task that cancels itself from
//! inside its callback is not re-armed.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::rc::{Rc, Weak};

use tracing::trace;

/// Heap entry ordering tasks by deadline, FIFO among equal deadlines.
struct Deadline {
    due_ms: u64,
    seq: u64,
    id: u64,
}

impl PartialEq for Deadline {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl Eq for Deadline {}

impl PartialOrd for Deadline {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Deadline {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: earlier deadlines first, then earlier scheduling order.
        (other.due_ms, other.seq).cmp(&(self.due_ms, self.seq))
    }
}

struct TaskSlot {
    /// Taken out while the callback runs so the slot's presence in the
    /// map keeps answering cancellation queries consistently.
    callback: Option<Box<dyn FnMut()>>,
    /// `Some` for recurring tasks.
    period_ms: Option<u64>,
}

struct Inner {
    now_ms: u64,
    next_id: u64,
    next_seq: u64,
    queue: BinaryHeap<Deadline>,
    tasks: HashMap<u64, TaskSlot>,
}

/// Shared handle to the task queue. Cloning shares the same queue.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<RefCell<Inner>>,
}

/// Cancellation capability for a scheduled task.
///
/// [`TimerHandle::cancel`] is idempotent: cancelling a task that already
/// fired, or cancelling twice, is a safe no-op. Dropping the handle does
/// not cancel the task; abandoned one-shot tasks fire harmlessly.
#[derive(Clone)]
pub struct TimerHandle {
    id: u64,
    inner: Weak<RefCell<Inner>>,
}

impl TimerHandle {
    /// Cancel the task. A cancelled task never runs again.
    pub fn cancel(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().tasks.remove(&self.id);
        }
    }

    /// Whether the task is still armed (scheduled and not cancelled).
    pub fn is_armed(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.borrow().tasks.contains_key(&self.id))
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create an empty queue with the clock at zero.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                now_ms: 0,
                next_id: 0,
                next_seq: 0,
                queue: BinaryHeap::new(),
                tasks: HashMap::new(),
            })),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Number of armed tasks (one-shot not yet fired, recurring not
    /// cancelled).
    pub fn armed_count(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Schedule a one-shot task after `delay_ms`.
    pub fn set_timeout(&self, delay_ms: u64, action: impl FnOnce() + 'static) -> TimerHandle {
        let mut action = Some(action);
        self.schedule(
            delay_ms,
            Box::new(move || {
                if let Some(action) = action.take() {
                    action();
                }
            }),
            None,
        )
    }

    /// Schedule a recurring task every `period_ms`.
    ///
    /// A zero period is treated as one millisecond so a single
    /// [`Scheduler::advance`] call cannot spin forever.
    pub fn set_interval(&self, period_ms: u64, action: impl FnMut() + 'static) -> TimerHandle {
        let period_ms = period_ms.max(1);
        self.schedule(period_ms, Box::new(action), Some(period_ms))
    }

    fn schedule(
        &self,
        delay_ms: u64,
        callback: Box<dyn FnMut()>,
        period_ms: Option<u64>,
    ) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let due_ms = inner.now_ms.saturating_add(delay_ms);
        inner.tasks.insert(
            id,
            TaskSlot {
                callback: Some(callback),
                period_ms,
            },
        );
        inner.queue.push(Deadline { due_ms, seq, id });
        trace!(id, due_ms, ?period_ms, "task scheduled");
        TimerHandle {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Move the clock forward by `ms`, running every task that falls due.
    ///
    /// Tasks run in deadline order (FIFO among equal deadlines), each to
    /// completion. Tasks scheduled during a callback with deadlines inside
    /// the window run in the same call.
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now_ms.saturating_add(ms);
        loop {
            let fired = {
                let mut inner = self.inner.borrow_mut();
                let mut next = None;
                while let Some(head) = inner.queue.peek() {
                    if head.due_ms > target {
                        break;
                    }
                    let head = inner.queue.pop().expect("peeked entry exists");
                    // Cancelled tasks leave stale heap entries behind.
                    let Some(slot) = inner.tasks.get_mut(&head.id) else {
                        continue;
                    };
                    let Some(callback) = slot.callback.take() else {
                        continue;
                    };
                    if head.due_ms > inner.now_ms {
                        inner.now_ms = head.due_ms;
                    }
                    next = Some((head, callback));
                    break;
                }
                if next.is_none() {
                    inner.now_ms = target;
                }
                next
            };
            let Some((deadline, mut callback)) = fired else {
                break;
            };

            // Invoke with no borrow held; the callback may reschedule or
            // cancel anything, including this task.
            callback();

            let mut inner = self.inner.borrow_mut();
            match inner.tasks.get(&deadline.id).map(|slot| slot.period_ms) {
                Some(Some(period_ms)) => {
                    let seq = inner.next_seq;
                    inner.next_seq += 1;
                    let due_ms = deadline.due_ms.saturating_add(period_ms);
                    inner.queue.push(Deadline {
                        due_ms,
                        seq,
                        id: deadline.id,
                    });
                    if let Some(slot) = inner.tasks.get_mut(&deadline.id) {
                        slot.callback = Some(callback);
                    }
                }
                // One-shot completed: the task clears its own slot.
                Some(None) => {
                    inner.tasks.remove(&deadline.id);
                }
                // Cancelled from inside its own callback: stay disarmed.
                None => {}
            }
        }
    }

    /// Run everything already due without moving the clock.
    pub fn run_pending(&self) {
        self.advance(0);
    }
}
