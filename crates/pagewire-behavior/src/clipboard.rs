//! Clipboard writes with a legacy fallback path.

use std::rc::Rc;

use pagewire_dom::{Document, Element};
use pagewire_host::capabilities::{CopyCommand, SecureClipboard};
use pagewire_host::{CopyError, CopyOutcome, Host, Scheduler};
use tracing::debug;

/// Writes text to the clipboard, preferring the secure-context
/// capability and falling back to the legacy copy command.
///
/// Outcomes are always delivered asynchronously relative to the call
/// site. The fallback stages the text in an off-screen element that is
/// removed again on every path; the document tree is unchanged once the
/// outcome resolves.
pub struct ClipboardWriter {
    scheduler: Scheduler,
    document: Document,
    secure: Option<Rc<dyn SecureClipboard>>,
    command: Option<Rc<dyn CopyCommand>>,
}

impl ClipboardWriter {
    /// Build a writer from the host's clipboard capabilities.
    pub fn new(host: &Host, document: &Document) -> Self {
        Self {
            scheduler: host.scheduler().clone(),
            document: document.clone(),
            secure: host.secure_clipboard(),
            command: host.copy_command(),
        }
    }

    /// Write `text` to the clipboard; `on_outcome` runs asynchronously
    /// with the result.
    pub fn write_text(&self, text: &str, on_outcome: impl FnOnce(CopyOutcome) + 'static) {
        if let Some(secure) = &self.secure {
            debug!("clipboard write via secure capability");
            secure.write_text(text, Box::new(on_outcome));
            return;
        }

        let outcome = self.copy_via_command(text);
        // The caller sees the outcome on the task queue, matching the
        // secure path's asynchronous contract.
        self.scheduler.set_timeout(0, move || on_outcome(outcome));
    }

    fn copy_via_command(&self, text: &str) -> CopyOutcome {
        let Some(command) = &self.command else {
            debug!("clipboard write failed: no capability");
            return Err(CopyError::CapabilityUnavailable);
        };
        debug!("clipboard write via legacy copy command");

        let stage = Element::new("textarea");
        stage.add_class("offscreen");
        stage.set_attr("aria-hidden", "true");
        self.document.body().append_child(&stage);
        stage.set_value(text);
        self.document.focus(&stage);
        self.document.select_all(&stage);

        let accepted = command.copy_selection(&self.document);

        // Removal happens on both outcome paths.
        stage.remove();
        self.document.release(&stage);

        if accepted {
            Ok(())
        } else {
            Err(CopyError::CommandRejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct RecordingCommand {
        accept: bool,
        copied: RefCell<Option<String>>,
        tree_size_at_copy: Cell<usize>,
    }

    impl CopyCommand for RecordingCommand {
        fn copy_selection(&self, document: &Document) -> bool {
            *self.copied.borrow_mut() = document.selection_text();
            self.tree_size_at_copy.set(document.node_count());
            self.accept
        }
    }

    struct InstantClipboard;

    impl SecureClipboard for InstantClipboard {
        fn write_text(&self, _text: &str, on_outcome: Box<dyn FnOnce(CopyOutcome)>) {
            on_outcome(Ok(()));
        }
    }

    fn outcome_slot() -> (Rc<RefCell<Option<CopyOutcome>>>, Rc<RefCell<Option<CopyOutcome>>>) {
        let slot = Rc::new(RefCell::new(None));
        (Rc::clone(&slot), slot)
    }

    #[test]
    fn test_secure_capability_outcome_forwarded() {
        let host = Host::new().with_secure_clipboard(Rc::new(InstantClipboard));
        let document = Document::new();
        let writer = ClipboardWriter::new(&host, &document);
        let (sink, seen) = outcome_slot();

        writer.write_text("hello", move |outcome| {
            *sink.borrow_mut() = Some(outcome);
        });

        assert_eq!(*seen.borrow(), Some(Ok(())));
    }

    #[test]
    fn test_fallback_copies_selection_and_cleans_up() {
        let command = Rc::new(RecordingCommand {
            accept: true,
            copied: RefCell::new(None),
            tree_size_at_copy: Cell::new(0),
        });
        let host = Host::new().with_copy_command(Rc::clone(&command) as Rc<dyn CopyCommand>);
        let document = Document::new();
        let writer = ClipboardWriter::new(&host, &document);
        let (sink, seen) = outcome_slot();

        writer.write_text("copied text", move |outcome| {
            *sink.borrow_mut() = Some(outcome);
        });

        // The staging element existed while the command ran...
        assert_eq!(command.tree_size_at_copy.get(), 1);
        assert_eq!(command.copied.borrow().as_deref(), Some("copied text"));
        // ...and is gone before the outcome resolves.
        assert_eq!(document.node_count(), 0);
        assert!(document.focused().is_none());
        assert!(document.selection_text().is_none());

        // Outcome is asynchronous.
        assert!(seen.borrow().is_none());
        host.scheduler().run_pending();
        assert_eq!(*seen.borrow(), Some(Ok(())));
    }

    #[test]
    fn test_fallback_rejection_still_cleans_up() {
        let command = Rc::new(RecordingCommand {
            accept: false,
            copied: RefCell::new(None),
            tree_size_at_copy: Cell::new(0),
        });
        let host = Host::new().with_copy_command(Rc::clone(&command) as Rc<dyn CopyCommand>);
        let document = Document::new();
        let writer = ClipboardWriter::new(&host, &document);
        let (sink, seen) = outcome_slot();

        writer.write_text("nope", move |outcome| {
            *sink.borrow_mut() = Some(outcome);
        });

        assert_eq!(document.node_count(), 0);
        host.scheduler().run_pending();
        assert_eq!(*seen.borrow(), Some(Err(CopyError::CommandRejected)));
    }

    #[test]
    fn test_no_capability_reports_unavailable() {
        let host = Host::new();
        let document = Document::new();
        let writer = ClipboardWriter::new(&host, &document);
        let (sink, seen) = outcome_slot();

        writer.write_text("text", move |outcome| {
            *sink.borrow_mut() = Some(outcome);
        });

        host.scheduler().run_pending();
        assert_eq!(*seen.borrow(), Some(Err(CopyError::CapabilityUnavailable)));
        assert_eq!(document.node_count(), 0);
    }
}
