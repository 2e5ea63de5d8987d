//! Page behavior layer: the scheduled and debounced interactions a page
//! carries on top of the host environment.
//!
//! Behaviors talk to two lower layers: [`pagewire_dom`] for the element
//! tree and [`pagewire_host`] for the task queue, lifecycle flags and
//! capability traits. Everything here is single threaded and
//! run-to-completion; time only moves when the host's scheduler is
//! advanced, which is also what makes the timing behaviors testable.
//!
//! [`page::init_page`] is the load-time entry point that wires the whole
//! set onto a document.

pub mod clipboard;
pub mod config;
pub mod confirm_nav;
pub mod counter;
pub mod debounce;
pub mod format;
pub mod notices;
pub mod page;
pub mod poller;
pub mod progress;
pub mod submit_guard;
pub mod timer;
pub mod validation;

pub use clipboard::ClipboardWriter;
pub use config::BehaviorConfig;
pub use counter::{CharacterCounter, CounterStatus};
pub use debounce::{Debouncer, debounce};
pub use format::{format_duration, format_file_size};
pub use notices::{AlertLevel, auto_hide_notices, show_alert};
pub use page::{PageBehaviors, PageCapabilities, init_page};
pub use pagewire_host::{CopyError, CopyOutcome};
pub use poller::VisibilityGatedPoller;
pub use progress::{hide_progress, show_progress};
pub use submit_guard::SubmitGuard;
pub use timer::ScopedTimer;
