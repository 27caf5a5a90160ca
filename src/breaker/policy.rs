//! Failure/cooldown decision logic.
//!
//! # Responsibilities
//! - Decide whether the breaker is open at a given moment
//! - Count failures within the trailing window and trip on threshold
//! - Clear failure history on success, reset on demand
//!
//! # Design Decisions
//! - Pure functions over `(&mut BreakerState, now)`: no clock access,
//!   no I/O, so every law is testable with plain timestamps
//! - Failures are pruned lazily on each evaluation, never by a timer
//! - Two states only (Closed/Open); a hard gate, no half-open probe

use crate::breaker::state::BreakerState;
use crate::config::PolicyConfig;

/// Is the breaker open at `now`?
///
/// An elapsed `open_until` is normalized back to the closed zero value
/// as a side effect; this is the auto-recovery transition. The caller
/// is responsible for persisting the state when that happens.
pub fn is_open(state: &mut BreakerState, now: u64) -> bool {
    if state.open_until == 0 {
        return false;
    }
    if now < state.open_until {
        return true;
    }
    // Cooldown elapsed
    state.clear();
    false
}

/// Record a failure at `now`. Returns true if the breaker just tripped.
pub fn record_failure(state: &mut BreakerState, now: u64, policy: &PolicyConfig) -> bool {
    let window = policy.failure_window_ms();
    state.failures.retain(|&t| now.saturating_sub(t) < window);
    state.failures.push(now);

    if state.failures.len() >= policy.max_failures as usize {
        state.open_until = now + policy.cooldown_ms();
        state.failures.clear();
        return true;
    }
    false
}

/// Record a success. Clears failure history without touching
/// `open_until`. Returns true if the state changed.
pub fn record_success(state: &mut BreakerState) -> bool {
    if state.failures.is_empty() {
        return false;
    }
    state.failures.clear();
    true
}

/// Unconditionally return to closed with empty failure history.
pub fn reset(state: &mut BreakerState) {
    state.clear();
}
