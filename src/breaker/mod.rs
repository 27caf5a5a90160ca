//! Auth-refresh circuit breaker.
//!
//! # States
//! - Closed: refresh calls pass through the gate
//! - Open: refresh calls fail fast, no network attempt made
//!
//! # State Transitions
//! ```text
//! Closed → Open: max_failures within failure_window (trip)
//! Open → Closed: cooldown elapses (auto-recovery, lazily on next read)
//!                OR explicit reset after a successful sign-in
//! ```
//!
//! # Design Decisions
//! - Two states only; a hard gate, no half-open probe request
//! - All mutation of the persisted record is routed through
//!   [`AuthBreaker`], the record's single owner — no ambient globals
//! - Trip side effects (session eviction, observer notification) run
//!   synchronously inside the failure that tripped, so callers observe
//!   a consistent world by the time the synthetic response returns
//! - One logical owner per storage record; concurrent processes or
//!   tabs sharing a store are not coordinated

pub mod policy;
pub mod state;
pub mod store;

use std::sync::Arc;

use crate::breaker::state::{now_ms, BreakerState};
use crate::breaker::store::StateStore;
use crate::config::{GateConfig, PolicyConfig};
use crate::notify::{ChangeHub, Subscription};
use crate::observability;
use crate::session::SessionEvictor;
use crate::storage::Storage;

/// Owner of the breaker record: policy evaluation, persistence, trip
/// side effects, and observer notification.
pub struct AuthBreaker {
    store: StateStore,
    policy: PolicyConfig,
    evictor: SessionEvictor,
    hub: ChangeHub,
}

impl AuthBreaker {
    pub fn new(config: &GateConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            store: StateStore::new(storage.clone(), config.policy.storage_key.clone()),
            policy: config.policy.clone(),
            evictor: SessionEvictor::new(storage, config.session.clone()),
            hub: ChangeHub::new(),
        }
    }

    /// Is the breaker currently open?
    pub fn is_open(&self) -> bool {
        self.is_open_at(now_ms())
    }

    /// Is the breaker open at `now`? An elapsed cooldown auto-closes
    /// and persists the closed state.
    pub fn is_open_at(&self, now: u64) -> bool {
        let mut state = self.store.load();
        let was_open = state.open_until != 0;
        let open = policy::is_open(&mut state, now);

        if was_open && !open {
            self.store.save(&state);
            tracing::info!("Breaker cooldown elapsed, auto-closed");
        }
        open
    }

    /// Record a refresh failure. Returns true if the breaker just
    /// tripped; eviction and notification have already run by then.
    pub fn record_failure(&self) -> bool {
        self.record_failure_at(now_ms())
    }

    /// Clock-explicit variant of [`record_failure`](Self::record_failure).
    pub fn record_failure_at(&self, now: u64) -> bool {
        let mut state = self.store.load();
        let tripped = policy::record_failure(&mut state, now, &self.policy);
        self.store.save(&state);

        if tripped {
            let evicted = self.evictor.evict();
            tracing::warn!(
                open_until = state.open_until,
                evicted_keys = evicted,
                cooldown_secs = self.policy.cooldown_secs,
                "Refresh breaker tripped"
            );
            observability::record_trip(evicted);
            self.hub.notify();
        } else {
            tracing::debug!(recent_failures = state.failures.len(), "Refresh failure recorded");
        }
        tripped
    }

    /// Record a successful refresh: clears failure history so a
    /// recovery after partial failures leaves no stale count behind.
    pub fn record_success(&self) {
        let mut state = self.store.load();
        if policy::record_success(&mut state) {
            self.store.save(&state);
            tracing::debug!("Refresh succeeded, failure history cleared");
        }
    }

    /// Unconditionally close the breaker, e.g. after an explicit
    /// credential-based sign-in succeeded. Observers are notified so
    /// any "temporarily unavailable" affordance can clear.
    pub fn reset(&self) {
        let mut state = self.store.load();
        policy::reset(&mut state);
        self.store.save(&state);
        tracing::info!("Breaker reset");
        self.hub.notify();
    }

    /// Register an observer for breaker transitions.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.hub.subscribe(callback)
    }

    /// Snapshot of the persisted state, for diagnostics.
    pub fn state(&self) -> BreakerState {
        self.store.load()
    }
}
