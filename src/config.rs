use std::path::PathBuf;

use crate::data::registry::{ModelId, RegistryError};

pub const DATA_DIR_VAR: &str = "ACCEPTANCE_DATA_DIR";
pub const MODEL_VAR: &str = "ACCEPTANCE_MODEL";
pub const DEFAULT_DATA_DIR: &str = "Archiv";

/// Startup settings, taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Folder holding `iclr/` and `metrics/`.
    pub data_root: PathBuf,
    /// Model selected on launch.
    pub initial_model: ModelId,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from(DEFAULT_DATA_DIR),
            initial_model: ModelId::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, RegistryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values fall back to the defaults;
    /// an unknown model name is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RegistryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let data_root = get(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.data_root);
        let initial_model = match get(MODEL_VAR) {
            Some(key) => key.trim().parse()?,
            None => defaults.initial_model,
        };

        Ok(Self {
            data_root,
            initial_model,
        })
    }
}
