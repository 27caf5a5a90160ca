//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (thresholds and windows > 0)
//! - Reject empty classification patterns and storage keys
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::GateConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut require = |ok: bool, field: &str, message: &str| {
        if !ok {
            errors.push(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
            });
        }
    };

    require(
        config.policy.max_failures >= 1,
        "policy.max_failures",
        "must be at least 1",
    );
    require(
        config.policy.failure_window_secs > 0,
        "policy.failure_window_secs",
        "must be greater than zero",
    );
    require(
        config.policy.cooldown_secs > 0,
        "policy.cooldown_secs",
        "must be greater than zero",
    );
    require(
        !config.policy.storage_key.is_empty(),
        "policy.storage_key",
        "must not be empty",
    );
    require(
        !config.refresh.token_endpoint_path.is_empty(),
        "refresh.token_endpoint_path",
        "must not be empty",
    );
    require(
        !config.refresh.grant_type.is_empty(),
        "refresh.grant_type",
        "must not be empty",
    );
    require(
        config.refresh.timeout_secs > 0,
        "refresh.timeout_secs",
        "must be greater than zero",
    );
    require(
        !(config.session.key_prefix.is_empty() && config.session.key_suffix.is_empty()),
        "session",
        "key_prefix and key_suffix must not both be empty",
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
