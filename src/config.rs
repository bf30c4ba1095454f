use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{HeightUnit, WeightUnit};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// General application settings
    pub settings: AppSettings,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Directory for history and session files
    pub data_dir: PathBuf,

    /// Height unit preselected on the form
    pub default_height_unit: HeightUnit,

    /// Weight unit preselected on the form
    pub default_weight_unit: WeightUnit,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            settings: AppSettings::default(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            data_dir: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".bmirs")
                .join("data"),
            default_height_unit: HeightUnit::Cm,
            default_weight_unit: WeightUnit::Kg,
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bmirs")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(_) => {
                tracing::debug!(path = %config_path.display(), "config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Save configuration to default location
    pub fn save_default(&mut self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to_file(config_path)
    }

    /// Get a settings value by key for the `config --get` command
    pub fn get_value(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => Some(self.settings.data_dir.display().to_string()),
            "default_height_unit" => Some(self.settings.default_height_unit.to_string()),
            "default_weight_unit" => Some(self.settings.default_weight_unit.to_string()),
            _ => None,
        }
    }

    /// Set a settings value by key for the `config --set` command
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => self.settings.data_dir = PathBuf::from(value),
            "default_height_unit" => {
                self.settings.default_height_unit =
                    value.parse().map_err(|e: String| anyhow::anyhow!(e))?
            }
            "default_weight_unit" => {
                self.settings.default_weight_unit =
                    value.parse().map_err(|e: String| anyhow::anyhow!(e))?
            }
            _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
        }
        self.metadata.updated_at = Utc::now();
        Ok(())
    }

    /// All known settings as (key, value) pairs for the `config --list` command
    pub fn list_values(&self) -> Vec<(&'static str, String)> {
        ["data_dir", "default_height_unit", "default_weight_unit"]
            .iter()
            .map(|key| (*key, self.get_value(key).unwrap_or_default()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.metadata.version, deserialized.metadata.version);
        assert_eq!(
            config.settings.default_height_unit,
            deserialized.settings.default_height_unit
        );
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut original = AppConfig::default();
        original
            .set_value("default_weight_unit", "lbs")
            .unwrap();

        original.save_to_file(&config_path).unwrap();
        let loaded = AppConfig::load_from_file(&config_path).unwrap();

        assert_eq!(loaded.settings.default_weight_unit, WeightUnit::Lbs);
    }

    #[test]
    fn test_get_set_values() {
        let mut config = AppConfig::default();
        assert_eq!(
            config.get_value("default_height_unit"),
            Some("cm".to_string())
        );
        assert!(config.get_value("nonsense").is_none());

        config.set_value("default_height_unit", "ft").unwrap();
        assert_eq!(
            config.settings.default_height_unit,
            HeightUnit::Ft
        );
        assert!(config.set_value("nonsense", "x").is_err());
        assert!(config.set_value("default_height_unit", "parsec").is_err());
    }

    #[test]
    fn test_list_values() {
        let config = AppConfig::default();
        let values = config.list_values();
        assert_eq!(values.len(), 3);
        assert!(values.iter().any(|(k, v)| *k == "default_weight_unit" && v == "kg"));
    }
}
