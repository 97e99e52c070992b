//! Engine configuration loaded from TOML

use civica_classify::ClassifierConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Engine configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Engine configuration
///
/// Everything has a default, so an empty TOML file (or no file at all)
/// yields a working engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Priority classifier rule tables
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Request channel capacity (default: 64)
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

/// Default request channel capacity
fn default_channel_capacity() -> usize {
    64
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.channel_capacity, 64);
        assert!(!config.classifier.urgency_keywords.is_empty());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: EngineConfig = toml::from_str(
            r#"
            channel_capacity = 8

            [classifier]
            urgency_keywords = ["fire"]
            "#,
        )
        .unwrap();
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.classifier.urgency_keywords, vec!["fire".to_string()]);
        // Unset tables keep their defaults
        assert!(!config.classifier.low_categories.is_empty());
    }
}
