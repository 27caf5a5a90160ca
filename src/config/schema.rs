//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files,
//! with defaults matching the constants the gate was designed around.

use serde::{Deserialize, Serialize};

/// Root configuration for the refresh gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Failure counting and cooldown settings.
    pub policy: PolicyConfig,

    /// Refresh request classification and timeout settings.
    pub refresh: RefreshConfig,

    /// Stale-session eviction settings.
    pub session: SessionConfig,
}

/// Breaker policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Failures within the window required to trip the breaker.
    pub max_failures: u32,

    /// Trailing window over which failures are counted (seconds).
    pub failure_window_secs: u64,

    /// How long the breaker stays open after tripping (seconds).
    pub cooldown_secs: u64,

    /// Storage key under which breaker state is persisted.
    pub storage_key: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_failures: 2,
            failure_window_secs: 10 * 60,
            cooldown_secs: 15 * 60,
            storage_key: "auth_circuit_breaker".to_string(),
        }
    }
}

impl PolicyConfig {
    /// Failure window in milliseconds (state timestamps are epoch ms).
    pub fn failure_window_ms(&self) -> u64 {
        self.failure_window_secs * 1000
    }

    /// Cooldown in milliseconds.
    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_secs * 1000
    }
}

/// Refresh request classification and timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Path segment identifying the token endpoint.
    pub token_endpoint_path: String,

    /// Value of the `grant_type` query parameter for refresh calls.
    pub grant_type: String,

    /// Cap on each refresh attempt (seconds).
    pub timeout_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            token_endpoint_path: "/auth/v1/token".to_string(),
            grant_type: "refresh_token".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Stale-session eviction configuration.
///
/// Session tokens are stored under keys shaped `<prefix>…<suffix>`
/// (e.g. `sb-<project>-auth-token`); on trip every matching key is
/// removed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Prefix of session-token storage keys.
    pub key_prefix: String,

    /// Suffix of session-token storage keys.
    pub key_suffix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key_prefix: "sb-".to_string(),
            key_suffix: "-auth-token".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = GateConfig::default();
        assert_eq!(config.policy.max_failures, 2);
        assert_eq!(config.policy.failure_window_ms(), 10 * 60 * 1000);
        assert_eq!(config.policy.cooldown_ms(), 15 * 60 * 1000);
        assert_eq!(config.policy.storage_key, "auth_circuit_breaker");
        assert_eq!(config.refresh.token_endpoint_path, "/auth/v1/token");
        assert_eq!(config.refresh.grant_type, "refresh_token");
        assert_eq!(config.refresh.timeout_secs, 10);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config: GateConfig = toml::from_str("[policy]\nmax_failures = 3\n").unwrap();
        assert_eq!(config.policy.max_failures, 3);
        assert_eq!(config.policy.cooldown_secs, 15 * 60);
        assert_eq!(config.session.key_prefix, "sb-");
    }
}
