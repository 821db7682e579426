//! Session configuration loaded from TOML
//!
//! ```toml
//! [layout]
//! node_width = 80.0
//! layer_height = 100.0
//!
//! [viewport]
//! width = 1024.0
//! height = 768.0
//! ```

use kinship_layout::{LayoutConfig, Viewport};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Settings for a [`Pedigree`](crate::Pedigree) session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PedigreeConfig {
    /// Layout geometry
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Area to centre the chart in, if known
    #[serde(default)]
    pub viewport: Option<Viewport>,
}

impl PedigreeConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: PedigreeConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate().map_err(ConfigError::InvalidValue)?;

        if let Some(viewport) = self.viewport {
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(viewport.width) || !valid(viewport.height) {
                return Err(ConfigError::InvalidValue(format!(
                    "viewport must have positive size, got {}x{}",
                    viewport.width, viewport.height
                )));
            }
        }

        Ok(())
    }
}
