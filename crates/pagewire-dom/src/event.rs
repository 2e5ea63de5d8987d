//! Events delivered to element listeners.

use std::cell::Cell;

/// Kinds of events an element can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Form-control content changed.
    Input,
    /// Form submission requested.
    Submit,
    /// Element activated (link or button).
    Click,
}

/// A dispatched event.
///
/// Listeners receive a shared reference and may call
/// [`Event::prevent_default`] to cancel the default action (navigation
/// for clicks, submission for submits). Dispatch returns the event so
/// the dispatcher can inspect the flag afterwards.
#[derive(Debug)]
pub struct Event {
    kind: EventKind,
    prevented: Cell<bool>,
}

impl Event {
    /// Create a new event of the given kind.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            prevented: Cell::new(false),
        }
    }

    /// The kind of this event.
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Cancel the default action for this event.
    pub fn prevent_default(&self) {
        self.prevented.set(true);
    }

    /// Whether a listener cancelled the default action.
    #[inline]
    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}
