//! Application configuration, read from a TOML file
//!
//! ```toml
//! data_dir = "/home/me/.local/share/signcoach"
//!
//! [storage]
//! library_key = "library"
//! profile_key = "profile"
//!
//! [practice]
//! max_redraws = 6
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::DEFAULT_MAX_REDRAWS;
use crate::store::FileStore;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the JSON documents live; platform data dir when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub storage: StorageConfig,
    pub practice: PracticeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub library_key: String,
    pub profile_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            library_key: "library".to_string(),
            profile_key: "profile".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeConfig {
    /// Re-draws allowed when a practice draw repeats the previous card
    pub max_redraws: usize,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            max_redraws: DEFAULT_MAX_REDRAWS,
        }
    }
}

impl AppConfig {
    /// Default config file location (e.g., ~/.config/signcoach/config.toml)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join("signcoach").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Read `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Configured data directory, or the platform default
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        match &self.data_dir {
            Some(dir) => Some(dir.clone()),
            None => FileStore::default_data_dir().ok(),
        }
    }
}
