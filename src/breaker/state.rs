//! Persisted breaker state.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Health record for the refresh dependency.
///
/// Serializes to the persisted JSON shape
/// `{ "failures": [epoch_ms, ...], "open_until": epoch_ms }` where an
/// `open_until` of 0 means closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakerState {
    /// Timestamps of recent failures (epoch ms), insertion order.
    pub failures: Vec<u64>,

    /// When the current cooldown ends (epoch ms); 0 when closed.
    pub open_until: u64,
}

impl BreakerState {
    /// Return to the zero value: closed, no failure history.
    pub fn clear(&mut self) {
        self.failures.clear();
        self.open_until = 0;
    }
}

/// Current time as epoch milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
