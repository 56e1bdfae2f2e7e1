//! JSON file configuration adapter.
//!
//! No path, or a path that does not exist, yields the defaults.  A file
//! that exists but fails to parse or validate is an error: running with
//! half-applied thresholds is worse than not starting.

use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use crate::app::ports::ConfigPort;
use crate::config::ControllerConfig;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct JsonFileConfig {
    path: Option<PathBuf>,
}

impl JsonFileConfig {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ConfigPort for JsonFileConfig {
    fn load(&self) -> Result<ControllerConfig, ConfigError> {
        let Some(path) = &self.path else {
            info!("Config: no file given, using defaults");
            return Ok(ControllerConfig::default());
        };
        if !path.exists() {
            info!("Config: {} not found, using defaults", path.display());
            return Ok(ControllerConfig::default());
        }
        let text = fs::read_to_string(path).map_err(|e| {
            warn!("Config: failed to read {}: {e}", path.display());
            ConfigError::Io
        })?;
        let config = ControllerConfig::from_json(&text)?;
        info!("Config: loaded {}", path.display());
        Ok(config)
    }
}
