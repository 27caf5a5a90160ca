//! Outbound HTTP transport boundary.
//!
//! The gate wraps an injected [`Transport`] rather than patching any
//! global client, so it composes explicitly at call sites and is
//! testable with an in-process mock.

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::error::TransportError;

/// A generic `(request) -> response` HTTP transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError>;
}

/// [`Transport`] over a pooled hyper client.
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HyperTransport {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        let (parts, body) = request.into_parts();
        let request = Request::from_parts(parts, Full::new(body));

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| TransportError::Connection(Box::new(e)))?;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| TransportError::Connection(Box::new(e)))?
            .to_bytes();

        Ok(Response::from_parts(parts, body))
    }
}
