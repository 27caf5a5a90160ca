//! Metric recording helpers.
//!
//! # Metrics
//! - `refresh_gate_requests_total` (counter): refresh attempts by outcome
//!   (`success`, `backend_failure`, `transport_failure`, `timeout`,
//!   `unclassified`, `short_circuit`)
//! - `refresh_gate_trips_total` (counter): breaker trips
//! - `refresh_gate_evicted_keys_total` (counter): session keys removed on trip
//!
//! Emitted through the `metrics` facade; installing an exporter is the
//! embedding application's concern.

use metrics::counter;

/// Record one gated refresh attempt by outcome.
pub fn record_refresh(outcome: &'static str) {
    counter!("refresh_gate_requests_total", "outcome" => outcome).increment(1);
}

/// Record a breaker trip and the number of session keys it evicted.
pub fn record_trip(evicted_keys: usize) {
    counter!("refresh_gate_trips_total").increment(1);
    counter!("refresh_gate_evicted_keys_total").increment(evicted_keys as u64);
}
