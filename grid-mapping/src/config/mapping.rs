//! Top-level mapping configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::LogOddsConfig;

use super::error::ConfigLoadError;
use super::grid::GridSection;
use super::sensor::SensorSection;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/config.toml";

/// Full mapping configuration loaded from TOML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Initial grid geometry and variant
    #[serde(default)]
    pub grid: GridSection,

    /// Log-odds update increments
    #[serde(default)]
    pub log_odds: LogOddsConfig,

    /// Scan range overrides
    #[serde(default)]
    pub sensor: SensorSection,
}

impl MappingConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Load from default config path (configs/config.toml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(toml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the grid constructors would panic on.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let grid = &self.grid;
        if !(grid.resolution > 0.0 && grid.resolution.is_finite()) {
            return Err(ConfigLoadError::Parse(format!(
                "grid.resolution must be positive, got {}",
                grid.resolution
            )));
        }
        if grid.width == 0 || grid.height == 0 {
            return Err(ConfigLoadError::Parse(
                "grid.width and grid.height must be at least 1".to_string(),
            ));
        }
        if grid.layers == 0 {
            return Err(ConfigLoadError::Parse(
                "grid.layers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
