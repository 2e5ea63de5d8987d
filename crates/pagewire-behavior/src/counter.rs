//! Live character counters for length-limited text fields.

use pagewire_dom::{Document, Element, EventKind};
use tracing::debug;

/// Counter status derived from the current length and the field limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterStatus {
    /// Below 90% of the limit.
    Normal,
    /// At or above 90% of the limit, but not over it.
    Warning,
    /// Over the limit.
    Over,
}

impl CounterStatus {
    /// Classify a length against a limit. Integer arithmetic: for a
    /// limit of 100, lengths 0..=89 are Normal, 90..=100 Warning,
    /// 101+ Over. A limit of 0 makes any non-empty content Over.
    pub fn classify(current: usize, limit: usize) -> Self {
        if current > limit {
            Self::Over
        } else if current * 10 >= limit * 9 {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// The visual status class, if the status carries one.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Warning => Some("text-warning"),
            Self::Over => Some("text-danger"),
        }
    }
}

/// A per-field live counter showing `"{current}/{limit} characters"`.
///
/// The display text never varies with status; only the status class on
/// the counter element does. The counter renders once at attach time so
/// pre-filled content is reflected before any input arrives.
pub struct CharacterCounter {
    field: Element,
    counter: Element,
    limit: usize,
}

impl CharacterCounter {
    /// Attach a counter to a field carrying a parseable `maxlength`
    /// attribute. Returns `None` (wiring nothing) when the attribute is
    /// missing or malformed, or the field has no parent to hold the
    /// counter.
    pub fn attach(field: &Element) -> Option<Self> {
        let limit: usize = field.attr("maxlength")?.parse().ok()?;
        let parent = field.parent()?;

        let counter = Element::new("div");
        counter.add_class("form-text");
        if let Some(id) = field.id() {
            counter.set_id(format!("{id}_counter"));
        }
        parent.append_child(&counter);

        let f = field.clone();
        let c = counter.clone();
        field.add_listener(EventKind::Input, move |_| render(&f, &c, limit));

        // Initial render covers pre-filled content.
        render(field, &counter, limit);
        debug!(limit, "character counter attached");

        Some(Self {
            field: field.clone(),
            counter,
            limit,
        })
    }

    /// Attach counters to every length-limited text field under the
    /// document.
    pub fn attach_all(document: &Document) -> Vec<Self> {
        document
            .query(|el| {
                (el.tag() == "textarea" || el.tag() == "input") && el.has_attr("maxlength")
            })
            .iter()
            .filter_map(Self::attach)
            .collect()
    }

    /// The counter display element.
    pub fn counter_element(&self) -> &Element {
        &self.counter
    }

    /// The declared limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Current status of the attached field.
    pub fn status(&self) -> CounterStatus {
        CounterStatus::classify(self.field.value().chars().count(), self.limit)
    }
}

fn render(field: &Element, counter: &Element, limit: usize) {
    let current = field.value().chars().count();
    counter.set_text(format!("{current}/{limit} characters"));

    counter.remove_class("text-warning");
    counter.remove_class("text-danger");
    if let Some(class) = CounterStatus::classify(current, limit).css_class() {
        counter.add_class(class);
    }
}
