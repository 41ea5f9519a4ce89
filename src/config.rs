use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NoteboxError, Result};
use crate::storage::IdStrategy;

pub const CONFIG_FILE: &str = "config.yaml";

/// Project configuration, read from `.notebox/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key under which the whole note collection is stored.
    pub storage_key: String,
    /// How new note ids are generated.
    pub id_strategy: IdStrategy,
    /// Characters of content shown in list previews.
    pub preview_chars: usize,
    /// Optional cap on the storage file size, in bytes.
    pub quota_bytes: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: "notes".to_string(),
            id_strategy: IdStrategy::default(),
            preview_chars: 100,
            quota_bytes: None,
        }
    }
}

impl Config {
    pub fn path(notebox_dir: &Path) -> PathBuf {
        notebox_dir.join(CONFIG_FILE)
    }

    /// Load the config from a `.notebox/` directory. A missing file means
    /// defaults; a malformed one is an error.
    pub fn load(notebox_dir: &Path) -> Result<Self> {
        let path = Self::path(notebox_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&contents).map_err(|e| {
            NoteboxError::Config(format!("failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, notebox_dir: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(Self::path(notebox_dir), yaml)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.storage_key.is_empty() {
            return Err(NoteboxError::Config(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
