use cadence_core::config::schema::{CadenceConfig, ValidationError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./cadence.yaml
    /// 2. ~/.cadence/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<CadenceConfig, ConfigError> {
        let local_config = PathBuf::from("./cadence.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".cadence").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(CadenceConfig::default())
    }

    pub async fn load_from(path: &Path) -> Result<CadenceConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse and validate YAML content.
    pub fn parse(content: &str) -> Result<CadenceConfig, ConfigError> {
        let config: CadenceConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}
