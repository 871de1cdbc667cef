//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] over a single JSON document. Missing fields
//! fall back to [`SessionConfig::default`]; both load and save run
//! [`SessionConfig::validate`].

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SessionConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SessionConfig, ConfigError> {
        let text = fs::read_to_string(&self.path)?;
        let config: SessionConfig = serde_json::from_str(&text)?;
        config.validate()?;
        info!("Config loaded from {}", self.path.display());
        Ok(config)
    }

    fn save(&self, config: &SessionConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let text = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, text + "\n")?;
        info!("Config saved to {}", self.path.display());
        Ok(())
    }
}
