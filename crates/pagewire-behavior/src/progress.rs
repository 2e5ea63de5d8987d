//! Show/hide helpers for a page progress indicator.

use pagewire_dom::Document;

/// Reveal the progress element with `id`, replacing its message. Returns
/// whether the element exists.
pub fn show_progress(document: &Document, id: &str, message: &str) -> bool {
    let Some(el) = document.get_element_by_id(id) else {
        return false;
    };
    el.set_text(message);
    el.set_hidden(false);
    true
}

/// Hide the progress element with `id`. Returns whether the element
/// exists.
pub fn hide_progress(document: &Document, id: &str) -> bool {
    let Some(el) = document.get_element_by_id(id) else {
        return false;
    };
    el.set_hidden(true);
    true
}
