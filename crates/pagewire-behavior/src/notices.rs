//! Transient page notices and their auto-dismissal.

use std::rc::Rc;

use pagewire_dom::{Document, Element};
use pagewire_host::Scheduler;
use pagewire_host::capabilities::UiToolkit;
use tracing::debug;

use crate::timer::ScopedTimer;

/// Severity of a programmatically shown notice. Maps to the notice's
/// style class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl AlertLevel {
    fn css_class(self) -> &'static str {
        match self {
            Self::Info => "alert-info",
            Self::Success => "alert-success",
            Self::Warning => "alert-warning",
            Self::Danger => "alert-danger",
        }
    }
}

/// Arm auto-dismiss timers for every notice already on the page.
///
/// A notice is any element with the `alert` class; `alert-permanent`
/// opts out. Dismissal goes through the toolkit when one is present so
/// the toolkit can animate; otherwise the element is detached directly.
pub fn auto_hide_notices(
    scheduler: &Scheduler,
    document: &Document,
    toolkit: Option<&Rc<dyn UiToolkit>>,
    autohide_ms: u64,
) -> Vec<ScopedTimer> {
    let notices = document.query(|el| el.has_class("alert") && !el.has_class("alert-permanent"));
    debug!(count = notices.len(), "arming notice auto-hide");

    notices
        .into_iter()
        .map(|notice| {
            dismiss_later(scheduler, notice, toolkit.cloned(), autohide_ms)
        })
        .collect()
}

/// Insert a notice as the first child of the page's `container` element
/// (or the body when no container exists) and arm its auto-dismissal.
pub fn show_alert(
    scheduler: &Scheduler,
    document: &Document,
    toolkit: Option<&Rc<dyn UiToolkit>>,
    message: &str,
    level: AlertLevel,
    autohide_ms: u64,
) -> Element {
    let notice = Element::new("div");
    notice.add_class("alert");
    notice.add_class(level.css_class());
    notice.set_text(message);

    let anchor = document
        .query(|el| el.has_class("container"))
        .into_iter()
        .next()
        .unwrap_or_else(|| document.body());
    anchor.insert_child(0, &notice);

    dismiss_later(scheduler, notice.clone(), toolkit.cloned(), autohide_ms);
    notice
}

fn dismiss_later(
    scheduler: &Scheduler,
    notice: Element,
    toolkit: Option<Rc<dyn UiToolkit>>,
    autohide_ms: u64,
) -> ScopedTimer {
    ScopedTimer::after(scheduler, autohide_ms, move || {
        // The notice may already be gone (user dismissed it by hand).
        if notice.parent().is_none() {
            return;
        }
        match &toolkit {
            Some(toolkit) => toolkit.dismiss_alert(&notice),
            None => notice.remove(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingToolkit {
        dismissed: RefCell<Vec<Element>>,
    }

    impl UiToolkit for RecordingToolkit {
        fn activate_tooltip(&self, _el: &Element) {}

        fn dismiss_alert(&self, el: &Element) {
            self.dismissed.borrow_mut().push(el.clone());
            el.remove();
        }
    }

    fn alert(doc: &Document, extra_class: Option<&str>) -> Element {
        let el = Element::new("div");
        el.add_class("alert");
        if let Some(class) = extra_class {
            el.add_class(class);
        }
        doc.body().append_child(&el);
        el
    }

    #[test]
    fn test_notices_removed_after_autohide_window() {
        let scheduler = Scheduler::new();
        let doc = Document::new();
        let notice = alert(&doc, None);
        let _timers = auto_hide_notices(&scheduler, &doc, None, 5000);

        scheduler.advance(4999);
        assert!(notice.parent().is_some());
        scheduler.advance(1);
        assert!(notice.parent().is_none());
    }

    #[test]
    fn test_permanent_notices_are_skipped() {
        let scheduler = Scheduler::new();
        let doc = Document::new();
        let pinned = alert(&doc, Some("alert-permanent"));
        let timers = auto_hide_notices(&scheduler, &doc, None, 5000);

        assert!(timers.is_empty());
        scheduler.advance(60_000);
        assert!(pinned.parent().is_some());
    }

    #[test]
    fn test_toolkit_dismissal_is_preferred() {
        let scheduler = Scheduler::new();
        let doc = Document::new();
        let notice = alert(&doc, None);
        let toolkit: Rc<dyn UiToolkit> = Rc::new(RecordingToolkit {
            dismissed: RefCell::new(Vec::new()),
        });
        let _timers = auto_hide_notices(&scheduler, &doc, Some(&toolkit), 5000);

        scheduler.advance(5000);
        assert!(notice.parent().is_none());
    }

    #[test]
    fn test_manually_removed_notice_is_left_alone() {
        let scheduler = Scheduler::new();
        let doc = Document::new();
        let notice = alert(&doc, None);
        let _timers = auto_hide_notices(&scheduler, &doc, None, 5000);

        notice.remove();
        scheduler.advance(5000);
        assert!(notice.parent().is_none());
    }

    #[test]
    fn test_show_alert_inserts_first_in_container() {
        let scheduler = Scheduler::new();
        let doc = Document::new();
        let container = Element::new("div");
        container.add_class("container");
        doc.body().append_child(&container);
        let existing = Element::new("p");
        container.append_child(&existing);

        let notice = show_alert(
            &scheduler,
            &doc,
            None,
            "Saved.",
            AlertLevel::Success,
            5000,
        );
        assert!(notice.has_class("alert-success"));
        assert_eq!(notice.text(), "Saved.");
        assert!(container.children()[0].same_node(&notice));

        scheduler.advance(5000);
        assert!(notice.parent().is_none());
    }

    #[test]
    fn test_show_alert_falls_back_to_body() {
        let scheduler = Scheduler::new();
        let doc = Document::new();
        let notice = show_alert(&scheduler, &doc, None, "Heads up", AlertLevel::Warning, 5000);
        assert!(doc.body().children()[0].same_node(&notice));
    }
}
