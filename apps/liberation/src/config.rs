//! # Application Configuration
//!
//! Optional TOML file, passed with `--config` or `LIBERATION_CONFIG`:
//!
//! ```toml
//! [engine]
//! national_median_income = 74580
//! academic_cutoff_month = 6
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! ```
//!
//! Every key is optional. Missing keys take the defaults shown above.

use liberation_core::{EngineConfig, ProgressionError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ProgressionError> {
        let config: AppConfig = toml::from_str(source)
            .map_err(|e| ProgressionError::InvalidConfig(format!("Cannot parse config: {}", e)))?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Load from a file, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ProgressionError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let metadata = std::fs::metadata(path).map_err(|e| {
            ProgressionError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ProgressionError::InvalidConfig(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let source = std::fs::read_to_string(path).map_err(|e| {
            ProgressionError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }
}
