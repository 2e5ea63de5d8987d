//! The assembled host environment handed to page initialization.

use std::rc::Rc;

use crate::capabilities::{CopyCommand, SecureClipboard};
use crate::lifecycle::PageLifecycle;
use crate::prefs::PreferenceStore;
use crate::scheduler::Scheduler;

/// Everything the environment provides to one page view: the task queue,
/// the lifecycle flags, the page's location path, the preference view and
/// the clipboard capabilities.
///
/// Built with the `with_*` methods; defaults are a visible page at `/`
/// with no clipboard capability and no preferences.
#[derive(Clone)]
pub struct Host {
    scheduler: Scheduler,
    lifecycle: PageLifecycle,
    path: String,
    prefs: PreferenceStore,
    secure_clipboard: Option<Rc<dyn SecureClipboard>>,
    copy_command: Option<Rc<dyn CopyCommand>>,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    /// Create a host for a visible page at path `/`.
    pub fn new() -> Self {
        Self {
            scheduler: Scheduler::new(),
            lifecycle: PageLifecycle::new(true),
            path: "/".to_owned(),
            prefs: PreferenceStore::new(),
            secure_clipboard: None,
            copy_command: None,
        }
    }

    /// Set the page's location path (its identity for opt-in behaviors).
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Install the preference view.
    #[must_use]
    pub fn with_preferences(mut self, prefs: PreferenceStore) -> Self {
        self.prefs = prefs;
        self
    }

    /// Install a secure-context clipboard capability.
    #[must_use]
    pub fn with_secure_clipboard(mut self, clipboard: Rc<dyn SecureClipboard>) -> Self {
        self.secure_clipboard = Some(clipboard);
        self
    }

    /// Install a legacy copy-command capability.
    #[must_use]
    pub fn with_copy_command(mut self, command: Rc<dyn CopyCommand>) -> Self {
        self.copy_command = Some(command);
        self
    }

    /// The task queue.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The page lifecycle.
    pub fn lifecycle(&self) -> &PageLifecycle {
        &self.lifecycle
    }

    /// The page's location path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The preference view.
    pub fn preferences(&self) -> &PreferenceStore {
        &self.prefs
    }

    /// The secure clipboard capability, if installed.
    pub fn secure_clipboard(&self) -> Option<Rc<dyn SecureClipboard>> {
        self.secure_clipboard.clone()
    }

    /// The legacy copy command, if installed.
    pub fn copy_command(&self) -> Option<Rc<dyn CopyCommand>> {
        self.copy_command.clone()
    }
}
