//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then the `DATA_ROOT`
//! environment variable, then explicit overrides from the command line.

use crate::constants::{DATA_ROOT_ENV, DEFAULT_DATA_ROOT, DEFAULT_DATA_TYPES};
use crate::error::{Result, SweepError};
use crate::schema::SchemaCandidates;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Global configuration for sweep indexing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `<type>/<element>/<file>` data
    pub data_root: PathBuf,

    /// Column-name guesses for temperature and value fields
    pub candidates: SchemaCandidates,

    /// Type folders created by [`Config::ensure_layout`]
    pub default_types: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from(DEFAULT_DATA_ROOT),
            candidates: SchemaCandidates::default(),
            default_types: DEFAULT_DATA_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load defaults, apply `DATA_ROOT` from the environment, then `cli_root`
    pub fn load_layered(cli_root: Option<PathBuf>) -> Result<Self> {
        Self::layered(std::env::var(DATA_ROOT_ENV).ok(), cli_root)
    }

    fn layered(env_root: Option<String>, cli_root: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(root) = env_root.filter(|r| !r.trim().is_empty()) {
            debug!("Using {} from environment: {}", DATA_ROOT_ENV, root);
            config.data_root = PathBuf::from(root);
        }

        if let Some(root) = cli_root {
            debug!("Using data root from command line: {}", root.display());
            config.data_root = root;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the data root
    pub fn with_data_root(mut self, data_root: impl Into<PathBuf>) -> Self {
        self.data_root = data_root.into();
        self
    }

    /// Replace the temperature column guesses
    pub fn with_temperature_keys(mut self, keys: Vec<String>) -> Self {
        self.candidates.temperature = keys;
        self
    }

    /// Replace the value column guesses
    pub fn with_value_keys(mut self, keys: Vec<String>) -> Self {
        self.candidates.value = keys;
        self
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.data_root.as_os_str().is_empty() {
            return Err(SweepError::configuration("Data root must not be empty"));
        }

        for (name, keys) in [
            ("temperature", &self.candidates.temperature),
            ("value", &self.candidates.value),
        ] {
            if keys.is_empty() {
                return Err(SweepError::configuration(format!(
                    "At least one {name} column name is required"
                )));
            }
            if keys.iter().any(|k| k.trim().is_empty()) {
                return Err(SweepError::configuration(format!(
                    "Blank {name} column name in candidate list"
                )));
            }
        }

        Ok(())
    }

    /// Create the data root and its default type folders
    pub fn ensure_layout(&self) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.data_root)?;

        let mut created = Vec::with_capacity(self.default_types.len());
        for data_type in &self.default_types {
            let dir = self.data_root.join(data_type);
            std::fs::create_dir_all(&dir)?;
            created.push(dir);
        }

        info!(
            "Data root ready at {} ({} type folders)",
            self.data_root.display(),
            created.len()
        );
        Ok(created)
    }
}
