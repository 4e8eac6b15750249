//! # Engine Configuration
//!
//! TOML-backed configuration for the engine, currently the loyalty
//! program parameters.
//!
//! ## Configuration File Format
//! ```toml
//! # mesa.toml
//! [loyalty]
//! reservation_bonus = 10
//! earn_step = 10
//! points_per_step = 20
//! ```
//!
//! Resolution order: explicit path, then the `MESA_CONFIG` environment
//! variable, then built-in defaults. A missing file is not an error;
//! a present-but-invalid file is.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use mesa_core::LoyaltyRules;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "MESA_CONFIG";

/// Configuration load errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub loyalty: LoyaltyRules,
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading engine config");

        let contents = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&contents)?;

        info!(
            reservation_bonus = config.loyalty.reservation_bonus,
            earn_step = config.loyalty.earn_step,
            points_per_step = config.loyalty.points_per_step,
            "Engine config loaded"
        );

        Ok(config)
    }

    /// Loads configuration from the `MESA_CONFIG` path, falling back to
    /// defaults when the variable is unset or the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if Path::new(&path).exists() => Self::load_from_path(path),
            _ => {
                debug!("No config file, using defaults");
                Ok(EngineConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_production_rates() {
        let config = EngineConfig::default();
        assert_eq!(config.loyalty, LoyaltyRules::default());
        assert_eq!(config.loyalty.reservation_bonus, 10);
    }

    #[test]
    fn test_parse_full_file() {
        let config: EngineConfig = toml::from_str(
            r#"
            [loyalty]
            reservation_bonus = 25
            earn_step = 50
            points_per_step = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.loyalty.reservation_bonus, 25);
        assert_eq!(config.loyalty.earn_step, 50);
        assert_eq!(config.loyalty.points_per_step, 5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            [loyalty]
            reservation_bonus = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.loyalty.reservation_bonus, 5);
        assert_eq!(config.loyalty.earn_step, 10);
        assert_eq!(config.loyalty.points_per_step, 20);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let result: Result<EngineConfig, _> = toml::from_str("loyalty = 3");
        assert!(result.is_err());
    }
}
