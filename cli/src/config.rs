use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use swipedo_core::CompletedPlacement;

const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "swipedo.log";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub completed_placement: CompletedPlacement,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            completed_placement: CompletedPlacement::default(),
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// `~/.swipedo`
    pub fn base_dir() -> Result<PathBuf> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home_dir.join(".swipedo"))
    }

    /// Reads the config from `path`, or from `~/.swipedo/config.json` when no
    /// path is given. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::base_dir()?.join(CONFIG_FILE_NAME),
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(p) => Ok(p.clone()),
            None => Ok(Self::base_dir()?.join(LOG_FILE_NAME)),
        }
    }
}
