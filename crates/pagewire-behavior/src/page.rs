//! Page initialization: wires every behavior onto a loaded document.

use std::rc::Rc;

use pagewire_dom::{Document, Element, EventKind};
use pagewire_host::Host;
use pagewire_host::capabilities::{ConfirmAction, PageReload, ScrollTarget, UiToolkit};
use tracing::{debug, info};

use crate::clipboard::ClipboardWriter;
use crate::config::BehaviorConfig;
use crate::confirm_nav::guard_delete_links;
use crate::counter::CharacterCounter;
use crate::notices::auto_hide_notices;
use crate::poller::VisibilityGatedPoller;
use crate::submit_guard::SubmitGuard;
use crate::timer::ScopedTimer;
use crate::validation::wire_validation;

/// Optional environment affordances page wiring can use. Each missing
/// capability disables only the behavior that needs it.
#[derive(Default)]
pub struct PageCapabilities {
    pub toolkit: Option<Rc<dyn UiToolkit>>,
    pub confirm: Option<Rc<dyn ConfirmAction>>,
    pub scroll: Option<Rc<dyn ScrollTarget>>,
    pub reload: Option<Rc<dyn PageReload>>,
}

/// Handles to the wired behaviors. Dropping this does not tear down
/// listeners already registered on the document; it only releases the
/// owned handles.
pub struct PageBehaviors {
    pub counters: Vec<CharacterCounter>,
    pub guards: Vec<SubmitGuard>,
    pub notice_timers: Vec<ScopedTimer>,
    pub poller: Option<VisibilityGatedPoller>,
    pub clipboard: ClipboardWriter,
}

/// Wire the full behavior set onto `document`.
///
/// This is the load-time entry point: tooltips, notice auto-hide, form
/// validation, character counters, double-submit guards, delete-link
/// confirmation, fragment-link scrolling, the stored theme preference,
/// and (on dashboard pages with a reload capability) the visibility-
/// gated refresh poller.
pub fn init_page(
    host: &Host,
    document: &Document,
    caps: &PageCapabilities,
    config: &BehaviorConfig,
) -> PageBehaviors {
    let scheduler = host.scheduler();

    if let Some(toolkit) = &caps.toolkit {
        let targets = document.query(|el| el.has_attr("data-tooltip"));
        debug!(count = targets.len(), "tooltips activated");
        for el in &targets {
            toolkit.activate_tooltip(el);
        }
    }

    let notice_timers = auto_hide_notices(
        scheduler,
        document,
        caps.toolkit.as_ref(),
        config.notice_autohide_ms,
    );

    wire_validation(document);
    let counters = CharacterCounter::attach_all(document);

    let guards: Vec<SubmitGuard> = document
        .query(|el| el.tag() == "form")
        .iter()
        .map(|form| SubmitGuard::attach(scheduler, form, config.submit_reenable_ms))
        .collect();

    guard_delete_links(document, caps.confirm.as_ref());
    wire_fragment_links(document, caps.scroll.as_ref());
    apply_theme(host, document);

    let poller = dashboard_poller(host, caps, config);

    info!(
        counters = counters.len(),
        guards = guards.len(),
        notices = notice_timers.len(),
        polling = poller.is_some(),
        "page behaviors initialized"
    );

    PageBehaviors {
        counters,
        guards,
        notice_timers,
        poller,
        clipboard: ClipboardWriter::new(host, document),
    }
}

/// In-page fragment links scroll to their target instead of navigating.
/// The target is resolved at click time, so content inserted after load
/// is still reachable.
fn wire_fragment_links(document: &Document, scroll: Option<&Rc<dyn ScrollTarget>>) {
    let Some(scroll) = scroll else {
        return;
    };
    let links = document.query(|el| {
        el.tag() == "a" && el.attr("href").is_some_and(|href| href.starts_with('#'))
    });
    for link in links {
        let doc = document.clone();
        let scroll = Rc::clone(scroll);
        let anchor = link.clone();
        link.add_listener(EventKind::Click, move |event| {
            let Some(href) = anchor.attr("href") else {
                return;
            };
            let fragment = &href[1..];
            if fragment.is_empty() {
                return;
            }
            if let Some(target) = doc.get_element_by_id(fragment) {
                event.prevent_default();
                scroll.scroll_to(&target);
            }
        });
    }
}

fn apply_theme(host: &Host, document: &Document) {
    if let Some(theme) = host.preferences().read("theme") {
        document.body().set_attr("data-theme", theme);
        debug!(theme, "stored theme applied");
    }
}

fn dashboard_poller(
    host: &Host,
    caps: &PageCapabilities,
    config: &BehaviorConfig,
) -> Option<VisibilityGatedPoller> {
    if !host.path().contains("dashboard") {
        return None;
    }
    let reload = Rc::clone(caps.reload.as_ref()?);
    Some(VisibilityGatedPoller::new(
        host.scheduler(),
        host.lifecycle(),
        config.dashboard_poll_ms,
        move || reload.reload(),
    ))
}
