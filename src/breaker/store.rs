//! Breaker state persistence.
//!
//! Makes `BreakerState` survive restarts. Reads never fail: missing or
//! corrupt data degrades to the zero value (closed). Writes are
//! best-effort; in-memory behavior within a session stays correct even
//! if every write is lost.

use std::sync::Arc;

use crate::breaker::state::BreakerState;
use crate::storage::Storage;

/// Load/save wrapper over one storage key.
pub struct StateStore {
    storage: Arc<dyn Storage>,
    key: String,
}

impl StateStore {
    pub fn new(storage: Arc<dyn Storage>, key: String) -> Self {
        Self { storage, key }
    }

    /// The last persisted state, or the zero value.
    pub fn load(&self) -> BreakerState {
        match self.storage.get(&self.key) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::debug!(key = %self.key, error = %e, "Corrupt breaker state, treating as closed");
                BreakerState::default()
            }),
            None => BreakerState::default(),
        }
    }

    /// Persist `state`. Serialization failures are swallowed.
    pub fn save(&self, state: &BreakerState) {
        match serde_json::to_string(state) {
            Ok(raw) => self.storage.set(&self.key, &raw),
            Err(e) => {
                tracing::debug!(key = %self.key, error = %e, "Failed to serialize breaker state");
            }
        }
    }
}
