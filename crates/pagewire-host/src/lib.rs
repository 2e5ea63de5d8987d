//! Host-environment layer for PageWire.
//!
//! Everything a page behavior needs from its surroundings lives here,
//! modeled explicitly so behaviors can be unit-tested by invoking
//! handlers directly without a real browser:
//!
//! - [`Scheduler`] - a single-threaded run-to-completion task queue with
//!   one-shot and periodic timers and idempotent cancellation handles.
//!   Time is virtual; `advance(ms)` drives it.
//! - [`PageLifecycle`] - the document-visibility flag with change
//!   notification, and the unload notification.
//! - [`capabilities`] - optional environment capabilities (secure
//!   clipboard, legacy copy command, UI toolkit, confirmation dialog,
//!   scroll, page reload) as trait objects.
//! - [`PreferenceStore`] - a read-only key-value preference view.
//! - [`Host`] - the assembled environment for one page view.
//! - [`logging`] - `tracing` subscriber setup for embedding applications.

pub mod capabilities;
pub mod logging;

mod host;
mod lifecycle;
mod prefs;
mod scheduler;

pub use capabilities::{CopyError, CopyOutcome};
pub use host::Host;
pub use lifecycle::PageLifecycle;
pub use prefs::PreferenceStore;
pub use scheduler::{Scheduler, TimerHandle};
