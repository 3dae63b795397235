//! Configuration types for mlstack

use crate::{ImageCoordinates, InstanceType, MlstackError, MlstackResult};
use serde::{Deserialize, Serialize};

/// Main configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlstackConfig {
    /// Deployment target settings
    pub deployment: DeploymentConfig,
    /// Inference image coordinates
    pub image: ImageCoordinates,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl MlstackConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &std::path::Path) -> MlstackResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> MlstackResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render the effective configuration
    pub fn to_toml(&self) -> MlstackResult<String> {
        toml::to_string_pretty(self).map_err(|e| MlstackError::Serialization(e.to_string()))
    }
}

/// Deployment target settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
    /// Fallback region when neither the command line nor the environment sets one
    pub region: Option<String>,
    /// Instance type backing the endpoint variant
    pub instance_type: InstanceType,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            region: None,
            instance_type: InstanceType::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
