//! Stale-session eviction.
//!
//! Once the refresh path is known to be failing, cached session tokens
//! are no longer trustworthy; a client that keeps them will retry
//! against a dead dependency forever. On trip, every storage key
//! matching the session-token naming convention is removed so the
//! application falls back to its signed-out state.

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::storage::Storage;

/// Removes cached session-token keys from storage.
pub struct SessionEvictor {
    storage: Arc<dyn Storage>,
    config: SessionConfig,
}

impl SessionEvictor {
    pub fn new(storage: Arc<dyn Storage>, config: SessionConfig) -> Self {
        Self { storage, config }
    }

    /// Delete every key matching the naming convention. Returns the
    /// number of keys removed.
    pub fn evict(&self) -> usize {
        let stale: Vec<String> = self
            .storage
            .keys()
            .into_iter()
            .filter(|key| {
                key.starts_with(&self.config.key_prefix) && key.ends_with(&self.config.key_suffix)
            })
            .collect();

        for key in &stale {
            self.storage.remove(key);
        }

        if !stale.is_empty() {
            tracing::info!(count = stale.len(), "Evicted stale session tokens");
        }
        stale.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn evictor(storage: Arc<MemoryStorage>) -> SessionEvictor {
        SessionEvictor::new(storage, SessionConfig::default())
    }

    #[test]
    fn removes_only_matching_keys() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("sb-projecta-auth-token", "jwt-a");
        storage.set("sb-projectb-auth-token", "jwt-b");
        storage.set("sb-projecta-settings", "keep");
        storage.set("auth_circuit_breaker", "keep");

        let evicted = evictor(storage.clone()).evict();

        assert_eq!(evicted, 2);
        assert!(storage.get("sb-projecta-auth-token").is_none());
        assert!(storage.get("sb-projectb-auth-token").is_none());
        assert!(storage.get("sb-projecta-settings").is_some());
        assert!(storage.get("auth_circuit_breaker").is_some());
    }

    #[test]
    fn empty_storage_is_a_noop() {
        let storage = Arc::new(MemoryStorage::new());
        assert_eq!(evictor(storage).evict(), 0);
    }
}
