//! Submit-time required-field validation.

use pagewire_dom::{Document, Element, EventKind};
use tracing::debug;

/// Wire submit-time validation onto every form opting in with the
/// `data-needs-validation` attribute.
///
/// On submit, a form with any empty required field has its submission
/// blocked. Either way the form gains the `was-validated` class so the
/// stylesheet can surface per-field validity.
pub fn wire_validation(document: &Document) -> Vec<Element> {
    let forms = document.query(|el| el.tag() == "form" && el.has_attr("data-needs-validation"));
    debug!(forms = forms.len(), "validation wired");

    for form in &forms {
        let f = form.clone();
        form.add_listener(EventKind::Submit, move |event| {
            if !form_is_valid(&f) {
                event.prevent_default();
            }
            f.add_class("was-validated");
        });
    }
    forms
}

fn form_is_valid(form: &Element) -> bool {
    form.descendants()
        .iter()
        .filter(|el| el.has_attr("required"))
        .all(|el| !el.value().is_empty())
}
