//! Confirmation gating for destructive navigation.

use std::rc::Rc;

use pagewire_dom::{Document, Element, EventKind};
use pagewire_host::capabilities::ConfirmAction;
use tracing::debug;

const DELETE_PROMPT: &str =
    "Are you sure you want to delete this item? This action cannot be undone.";

/// Wire a confirmation prompt onto every delete link on the page.
///
/// A delete link is an anchor whose `href` contains `delete`. Links that
/// already carry their own click handler are assumed to manage their own
/// confirmation and are skipped. Without a confirmation capability
/// nothing is wired; destructive links then navigate unguarded rather
/// than becoming dead.
pub fn guard_delete_links(document: &Document, confirm: Option<&Rc<dyn ConfirmAction>>) -> usize {
    let Some(confirm) = confirm else {
        debug!("no confirm capability; delete links left unguarded");
        return 0;
    };

    let links = document.query(|el| {
        el.tag() == "a"
            && el.attr("href").is_some_and(|href| href.contains("delete"))
            && !el.has_listener(EventKind::Click)
    });
    debug!(links = links.len(), "delete links guarded");

    for link in &links {
        let confirm = Rc::clone(confirm);
        link.add_listener(EventKind::Click, move |event| {
            if !confirm.confirm(DELETE_PROMPT) {
                event.prevent_default();
            }
        });
    }
    links.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct ScriptedConfirm {
        accept: bool,
        prompts: RefCell<Vec<String>>,
    }

    impl ConfirmAction for ScriptedConfirm {
        fn confirm(&self, message: &str) -> bool {
            self.prompts.borrow_mut().push(message.to_owned());
            self.accept
        }
    }

    fn delete_link(doc: &Document) -> Element {
        let link = Element::new("a");
        link.set_attr("href", "/items/3/delete");
        doc.body().append_child(&link);
        link
    }

    #[test]
    fn test_declined_confirmation_blocks_navigation() {
        let doc = Document::new();
        let link = delete_link(&doc);
        let confirm: Rc<dyn ConfirmAction> = Rc::new(ScriptedConfirm {
            accept: false,
            prompts: RefCell::new(Vec::new()),
        });
        assert_eq!(guard_delete_links(&doc, Some(&confirm)), 1);

        let event = link.dispatch(EventKind::Click);
        assert!(event.default_prevented());
    }

    #[test]
    fn test_accepted_confirmation_lets_navigation_proceed() {
        let doc = Document::new();
        let link = delete_link(&doc);
        let scripted = Rc::new(ScriptedConfirm {
            accept: true,
            prompts: RefCell::new(Vec::new()),
        });
        let confirm: Rc<dyn ConfirmAction> = Rc::clone(&scripted) as Rc<dyn ConfirmAction>;
        guard_delete_links(&doc, Some(&confirm));

        let event = link.dispatch(EventKind::Click);
        assert!(!event.default_prevented());
        assert_eq!(
            scripted.prompts.borrow().as_slice(),
            &[DELETE_PROMPT.to_owned()]
        );
    }

    #[test]
    fn test_links_with_existing_click_handler_are_skipped() {
        let doc = Document::new();
        let link = delete_link(&doc);
        let custom_ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&custom_ran);
        link.add_listener(EventKind::Click, move |_| flag.set(true));

        let confirm: Rc<dyn ConfirmAction> = Rc::new(ScriptedConfirm {
            accept: false,
            prompts: RefCell::new(Vec::new()),
        });
        assert_eq!(guard_delete_links(&doc, Some(&confirm)), 0);

        let event = link.dispatch(EventKind::Click);
        assert!(custom_ran.get());
        assert!(!event.default_prevented());
    }

    #[test]
    fn test_non_delete_links_are_ignored() {
        let doc = Document::new();
        let link = Element::new("a");
        link.set_attr("href", "/items/3/edit");
        doc.body().append_child(&link);

        let confirm: Rc<dyn ConfirmAction> = Rc::new(ScriptedConfirm {
            accept: false,
            prompts: RefCell::new(Vec::new()),
        });
        assert_eq!(guard_delete_links(&doc, Some(&confirm)), 0);
    }

    #[test]
    fn test_missing_capability_wires_nothing() {
        let doc = Document::new();
        let link = delete_link(&doc);
        assert_eq!(guard_delete_links(&doc, None), 0);
        let event = link.dispatch(EventKind::Click);
        assert!(!event.default_prevented());
    }
}
