//! Intercepting request gate.
//!
//! # Data Flow
//! ```text
//! Outbound request:
//!     → classify.rs (token endpoint + refresh grant?)
//!         no  → injected transport, untouched
//!         yes → breaker open?
//!             yes → synthetic 503 circuit_breaker_open (no network)
//!             no  → transport raced against the refresh timeout
//!                 2xx        → record_success, real response
//!                 ≥500 / 522 → record_failure, synthetic 503 refresh_failed
//!                 timeout or network error
//!                            → record_failure, synthetic 503 refresh_failed
//!                 other      → unclassified, real response
//! ```
//!
//! # Design Decisions
//! - Every gated call resolves; nothing hangs past the timeout, so the
//!   calling SDK's retry logic cannot spin on a dead connection
//! - Failures are recovered into the policy, never thrown: callers see
//!   "breaker open" and "real timeout" identically as a 503
//! - No retries here; each attempt is evaluated exactly once
//! - Trip side effects (eviction, notification) complete before the
//!   synthetic response is returned

pub mod classify;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::{header, Request, Response, StatusCode};

use crate::breaker::AuthBreaker;
use crate::config::RefreshConfig;
use crate::error::TransportError;
use crate::observability;
use crate::transport::Transport;

/// Machine-readable error code for a short-circuited refresh.
pub const ERROR_BREAKER_OPEN: &str = "circuit_breaker_open";
/// Machine-readable error code for a failed or timed-out refresh.
pub const ERROR_REFRESH_FAILED: &str = "refresh_failed";

/// Wraps a transport, applying the breaker policy to refresh requests.
pub struct RefreshGate {
    transport: Arc<dyn Transport>,
    breaker: Arc<AuthBreaker>,
    config: RefreshConfig,
}

impl RefreshGate {
    pub fn new(
        transport: Arc<dyn Transport>,
        breaker: Arc<AuthBreaker>,
        config: RefreshConfig,
    ) -> Self {
        Self {
            transport,
            breaker,
            config,
        }
    }

    /// The breaker this gate consults.
    pub fn breaker(&self) -> &Arc<AuthBreaker> {
        &self.breaker
    }

    /// Send a request through the gate.
    ///
    /// Non-refresh requests reach the transport unmodified and their
    /// errors propagate untouched. Refresh requests always resolve to
    /// a response: real on success or pass-through, synthetic 503 on
    /// short-circuit, timeout, or dependency failure.
    pub async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        if !classify::is_refresh_request(request.uri(), &self.config) {
            return self.transport.send(request).await;
        }

        if self.breaker.is_open() {
            tracing::debug!(uri = %request.uri(), "Refresh short-circuited, breaker open");
            observability::record_refresh("short_circuit");
            return Ok(synthetic_response(
                ERROR_BREAKER_OPEN,
                "Auth refresh paused, circuit breaker open",
            ));
        }

        let timeout = Duration::from_secs(self.config.timeout_secs);
        match tokio::time::timeout(timeout, self.transport.send(request)).await {
            Ok(Ok(response)) => self.classify_response(response),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Refresh transport failure");
                observability::record_refresh("transport_failure");
                self.breaker.record_failure();
                Ok(synthetic_response(ERROR_REFRESH_FAILED, &e.to_string()))
            }
            Err(_elapsed) => {
                // Dropping the in-flight future aborts the request
                tracing::warn!(
                    timeout_secs = self.config.timeout_secs,
                    "Refresh timed out, aborted"
                );
                observability::record_refresh("timeout");
                self.breaker.record_failure();
                Ok(synthetic_response(
                    ERROR_REFRESH_FAILED,
                    "refresh request timed out",
                ))
            }
        }
    }

    fn classify_response(
        &self,
        response: Response<Bytes>,
    ) -> Result<Response<Bytes>, TransportError> {
        let status = response.status();
        let code = status.as_u16();

        // 522 is the objects-store edge code; both clauses are part of
        // the documented failure contract
        if code == 522 || code >= 500 {
            tracing::warn!(status = code, "Refresh failed upstream");
            observability::record_refresh("backend_failure");
            self.breaker.record_failure();
            return Ok(synthetic_response(
                ERROR_REFRESH_FAILED,
                &format!("upstream returned status {code}"),
            ));
        }

        if status.is_success() {
            observability::record_refresh("success");
            self.breaker.record_success();
            return Ok(response);
        }

        // e.g. 400 invalid_grant: a definitive answer from a healthy
        // dependency, surfaced untouched and not fed to the policy
        observability::record_refresh("unclassified");
        Ok(response)
    }
}

fn synthetic_response(error: &str, description: &str) -> Response<Bytes> {
    let body = serde_json::json!({
        "error": error,
        "error_description": description,
    });
    Response::builder()
        .status(StatusCode::SERVICE_UNAVAILABLE)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Bytes::from(body.to_string()))
        .expect("static response parts are valid")
}
