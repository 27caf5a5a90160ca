//! Shared utilities for integration testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use auth_refresh_gate::error::TransportError;
use auth_refresh_gate::Transport;
use bytes::Bytes;
use http::{Request, Response};

/// Route gate logs through the test harness; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_refresh_gate=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

type HandlerFuture = Pin<Box<dyn Future<Output = Result<Response<Bytes>, TransportError>> + Send>>;

/// In-process programmable transport; counts calls that reach it.
pub struct MockTransport {
    handler: Box<dyn Fn(Request<Bytes>) -> HandlerFuture + Send + Sync>,
    calls: AtomicU32,
}

impl MockTransport {
    pub fn new<F, Fut>(handler: F) -> Arc<Self>
    where
        F: Fn(Request<Bytes>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<Bytes>, TransportError>> + Send + 'static,
    {
        Arc::new(Self {
            handler: Box::new(move |request| Box::pin(handler(request))),
            calls: AtomicU32::new(0),
        })
    }

    /// Number of requests that actually reached the transport.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.handler)(request).await
    }
}

/// A response with the given status and an empty body.
pub fn status_response(status: u16) -> Response<Bytes> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .unwrap()
}

/// A token-refresh request as the auth SDK would issue it.
pub fn refresh_request() -> Request<Bytes> {
    Request::builder()
        .method("POST")
        .uri("https://example.supabase.co/auth/v1/token?grant_type=refresh_token")
        .body(Bytes::new())
        .unwrap()
}

/// An ordinary data query that must never be gated.
pub fn data_request() -> Request<Bytes> {
    Request::builder()
        .method("GET")
        .uri("https://example.supabase.co/rest/v1/client_profiles?select=*")
        .body(Bytes::new())
        .unwrap()
}
