//! Capability interfaces provided by the host environment.
//!
//! Behaviors depend only on these traits, never on a concrete toolkit or
//! browser API. Every capability is optional; a missing capability makes
//! the dependent behavior wire to nothing rather than fail page
//! initialization.

use pagewire_dom::{Document, Element};
use thiserror::Error;

/// Why a clipboard write did not land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CopyError {
    /// Neither the secure clipboard nor the legacy copy command exists.
    #[error("no clipboard capability is available")]
    CapabilityUnavailable,
    /// The legacy copy command ran and reported failure.
    #[error("copy command rejected the write")]
    CommandRejected,
}

/// Outcome of a clipboard write, delivered asynchronously.
pub type CopyOutcome = Result<(), CopyError>;

/// Secure-context clipboard write. Its asynchronous outcome is forwarded
/// to the caller unchanged.
pub trait SecureClipboard {
    fn write_text(&self, text: &str, on_outcome: Box<dyn FnOnce(CopyOutcome)>);
}

/// Legacy copy command: copies the document's current selection and
/// reports whether the environment accepted it.
pub trait CopyCommand {
    fn copy_selection(&self, document: &Document) -> bool;
}

/// UI-toolkit affordances the page delegates to.
pub trait UiToolkit {
    /// Activate tooltip behavior on an element.
    fn activate_tooltip(&self, el: &Element);
    /// Dismiss a notice element (animation, then removal).
    fn dismiss_alert(&self, el: &Element);
}

/// Modal confirmation dialog. Returns `true` when the user accepts.
pub trait ConfirmAction {
    fn confirm(&self, message: &str) -> bool;
}

/// Scrolls an element into view.
pub trait ScrollTarget {
    fn scroll_to(&self, el: &Element);
}

/// Requests a full page reload.
pub trait PageReload {
    fn reload(&self);
}
