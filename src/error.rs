//! Error types.
//!
//! Storage failures never appear here: persistence is best-effort and
//! corrupt or unwritable state degrades to in-memory behavior instead
//! of surfacing an error.

use thiserror::Error;

use crate::config::ValidationError;

/// Errors surfaced by an outbound transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network-level failure (DNS, connect, reset, protocol).
    #[error("connection failed: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request could not be constructed for the wire.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] http::Error),
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
