//! DOM-like element tree for PageWire.
//!
//! This crate models the slice of a document that behavior components
//! interact with: elements with a tag, attributes, a class list, text,
//! a form-control value, and per-element event listeners. Nothing here
//! renders; the tree exists so behaviors can be driven and inspected
//! without a real browser document.
//!
//! # Structure
//!
//! - [`Element`] - a shared handle to one node (attributes, classes,
//!   children, listeners)
//! - [`Document`] - the root of the tree plus focus/selection tracking
//! - [`Event`] / [`EventKind`] - dispatched to listeners with
//!   `prevent_default` semantics

mod document;
mod element;
mod event;

pub use document::Document;
pub use element::Element;
pub use event::{Event, EventKind};
