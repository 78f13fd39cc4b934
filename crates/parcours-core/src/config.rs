use crate::error::{CaseError, Result};
use crate::paths;
use crate::types::SURGEONS;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_version() -> u32 {
    1
}

fn default_surgeons() -> Vec<String> {
    SURGEONS.iter().map(|s| s.to_string()).collect()
}

/// Project configuration at `.parcours/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: String,
    /// Roster offered for medical recommendations. Defaults to the fixed
    /// five-entry list.
    #[serde(default = "default_surgeons")]
    pub surgeons: Vec<String>,
}

impl Config {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            version: 1,
            project: project.into(),
            surgeons: default_surgeons(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(CaseError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("parcours")
    }
}
