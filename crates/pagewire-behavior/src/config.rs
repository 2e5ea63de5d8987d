//! Behavior timing configuration.

use serde::{Deserialize, Serialize};

/// Durations used by the page behaviors.
///
/// The defaults match the shipped page contract; hosts may load an
/// override from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// How long a dismissible notice stays on screen, in milliseconds.
    pub notice_autohide_ms: u64,

    /// Fallback delay before a disabled submit control is re-enabled,
    /// in milliseconds. Covers forms that fail validation and stay
    /// on-page.
    pub submit_reenable_ms: u64,

    /// Period of the dashboard auto-refresh poller, in milliseconds.
    pub dashboard_poll_ms: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            notice_autohide_ms: 5000,
            submit_reenable_ms: 5000,
            dashboard_poll_ms: 30_000,
        }
    }
}

impl BehaviorConfig {
    /// Parse a config override from JSON; absent fields keep defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
