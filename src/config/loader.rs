//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GateConfig;
use crate::config::validation::validate_config;
use crate::error::ConfigError;

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GateConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GateConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn loads_and_validates() {
        let path = "test_gate_config.toml";
        fs::write(path, "[policy]\ncooldown_secs = 60\n").unwrap();

        let config = load_config(Path::new(path)).unwrap();
        assert_eq!(config.policy.cooldown_secs, 60);
        assert_eq!(config.policy.max_failures, 2);

        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn invalid_values_rejected() {
        let path = "test_gate_config_invalid.toml";
        fs::write(path, "[policy]\nmax_failures = 0\n").unwrap();

        let err = load_config(Path::new(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        fs::remove_file(path).unwrap_or_default();
    }
}
