//! Change-notification hub.
//!
//! # Responsibilities
//! - Let observers (UI state, session managers) react to breaker
//!   transitions without coupling them to the gate
//! - Guarantee one misbehaving observer cannot affect the rest
//!
//! # Design Decisions
//! - `notify()` runs callbacks synchronously, in arbitrary order
//! - Callbacks are cloned out of the registry before invocation, so an
//!   observer may subscribe or unsubscribe from inside its callback
//! - A panicking callback is caught and logged; it never propagates to
//!   the notifier or suppresses other callbacks
//! - `Subscription` unregisters on drop; explicit `unsubscribe()` is
//!   idempotent

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Callback = Arc<dyn Fn() + Send + Sync + 'static>;
type Registry = Mutex<HashMap<u64, Callback>>;

/// A set of zero-argument callbacks fired on breaker transitions.
#[derive(Clone, Default)]
pub struct ChangeHub {
    registry: Arc<Registry>,
    next_id: Arc<AtomicU64>,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. The returned `Subscription` removes it when
    /// dropped or explicitly unsubscribed.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.registry).insert(id, Arc::new(callback));
        Subscription {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    /// Invoke all currently registered callbacks.
    pub fn notify(&self) {
        let callbacks: Vec<Callback> = lock(&self.registry).values().cloned().collect();
        for callback in callbacks {
            if catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
                tracing::warn!("Breaker observer panicked during notification");
            }
        }
    }

    /// Number of registered callbacks.
    pub fn observer_count(&self) -> usize {
        lock(&self.registry).len()
    }
}

/// Handle for one registered callback.
pub struct Subscription {
    registry: Weak<Registry>,
    id: u64,
}

impl Subscription {
    /// Remove the callback. Safe to call more than once.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).remove(&self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

// A poisoned registry only means some observer panicked while we held
// the lock elsewhere; the map itself is still coherent.
fn lock(registry: &Registry) -> std::sync::MutexGuard<'_, HashMap<u64, Callback>> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn notify_reaches_all_observers() {
        let hub = ChangeHub::new();
        let count = Arc::new(AtomicU32::new(0));

        let c1 = count.clone();
        let _s1 = hub.subscribe(move || {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        let c2 = count.clone();
        let _s2 = hub.subscribe(move || {
            c2.fetch_add(1, Ordering::SeqCst);
        });

        hub.notify();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let hub = ChangeHub::new();
        let count = Arc::new(AtomicU32::new(0));

        let c = count.clone();
        let sub = hub.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        hub.notify();
        drop(sub);
        hub.notify();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(hub.observer_count(), 0);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let hub = ChangeHub::new();
        let sub = hub.subscribe(|| {});
        sub.unsubscribe();
        sub.unsubscribe();
        assert_eq!(hub.observer_count(), 0);
    }

    #[test]
    fn panicking_observer_is_isolated() {
        let hub = ChangeHub::new();
        let count = Arc::new(AtomicU32::new(0));

        let _bad = hub.subscribe(|| panic!("observer bug"));
        let c = count.clone();
        let _good = hub.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        hub.notify();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // The hub itself stays usable
        hub.notify();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn observer_may_unsubscribe_during_notify() {
        let hub = ChangeHub::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let hub2 = hub.clone();
        let slot2 = slot.clone();
        let sub = hub.subscribe(move || {
            // Taking the subscription drops it, which re-enters the registry
            let _ = slot2.lock().unwrap().take();
            let _ = hub2.observer_count();
        });
        *slot.lock().unwrap() = Some(sub);

        hub.notify();
        assert_eq!(hub.observer_count(), 0);
    }
}
