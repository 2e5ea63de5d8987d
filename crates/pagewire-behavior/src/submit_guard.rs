//! Double-submit protection for forms.

use pagewire_dom::{Element, EventKind};
use pagewire_host::Scheduler;
use tracing::debug;

use crate::timer::ScopedTimer;

/// Disables a form's submit controls on submit and re-enables them after
/// a fallback delay.
///
/// The disable happens synchronously inside the submit dispatch, so a
/// second submit in the same turn finds the controls already disabled.
/// The re-enable timer is deliberately unowned once armed: even if the
/// guard itself is dropped, a page that never navigates away gets its
/// controls back.
pub struct SubmitGuard {
    form: Element,
    controls: Vec<Element>,
}

impl SubmitGuard {
    /// Wire the guard onto `form`. Submit controls are the descendant
    /// `button` and `input` elements declaring `type="submit"`.
    pub fn attach(scheduler: &Scheduler, form: &Element, reenable_ms: u64) -> Self {
        let controls: Vec<Element> = form
            .descendants()
            .into_iter()
            .filter(|el| {
                (el.tag() == "button" || el.tag() == "input")
                    && el.attr("type").as_deref() == Some("submit")
            })
            .collect();
        debug!(controls = controls.len(), "submit guard attached");

        let sched = scheduler.clone();
        let guarded = controls.clone();
        form.add_listener(EventKind::Submit, move |_| {
            for control in &guarded {
                control.set_disabled(true);
            }
            let to_restore = guarded.clone();
            let timer = ScopedTimer::after(&sched, reenable_ms, move || {
                for control in &to_restore {
                    control.set_disabled(false);
                }
            });
            // The timer outlives this dispatch; dropping the handle
            // leaves it armed.
            drop(timer);
        });

        Self {
            form: form.clone(),
            controls,
        }
    }

    /// The guarded form.
    pub fn form(&self) -> &Element {
        &self.form
    }

    /// The controls the guard toggles.
    pub fn controls(&self) -> &[Element] {
        &self.controls
    }
}
