//! Read-only key-value preference view.
//!
//! Behaviors read user preferences (the theme choice, for one) but never
//! write them; persistence belongs to the host environment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A snapshot of user preferences, keyed by string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceStore {
    entries: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from key-value pairs.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a store from a JSON object of string values.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read a preference value.
    pub fn read(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
