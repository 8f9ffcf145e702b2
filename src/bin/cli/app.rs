use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use signcoach_lib::flashcards::CategoryFilter;
use signcoach_lib::store::{FileStore, MemoryStore, SharedStore};
use signcoach_lib::config::ConfigError;
use signcoach_lib::{AppConfig, Session};

use crate::FilterArgs;

/// Where the CLI reads its configuration and data from
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub ephemeral: bool,
}

/// Shared application state for CLI commands
pub struct App {
    /// `None` for ephemeral sessions
    pub data_dir: Option<PathBuf>,
    pub session: Session,
}

impl App {
    /// Load config, open the store and start a session
    pub fn new(options: &AppOptions) -> Result<Self> {
        let config = load_config(options.config.as_deref(), AppConfig::default_path)?;

        let (store, data_dir): (SharedStore, Option<PathBuf>) = if options.ephemeral {
            log::info!("Ephemeral session, nothing will be saved");
            (Arc::new(MemoryStore::new()), None)
        } else {
            let data_dir = match &options.data_dir {
                Some(dir) => dir.clone(),
                None => config
                    .resolve_data_dir()
                    .context("Failed to get data directory")?,
            };
            let store = FileStore::new(data_dir.clone())
                .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
            (Arc::new(store), Some(data_dir))
        };

        let session = Session::open(store, &config).context("Failed to load library")?;

        Ok(Self {
            data_dir,
            session,
        })
    }

    /// Apply search text and category from the command line.
    ///
    /// Unlike the interactive selector, an unknown category here is an error.
    pub fn apply_filter(&mut self, filter: &FilterArgs) -> Result<()> {
        let category = CategoryFilter::from(filter.category.trim());
        if let CategoryFilter::Only(name) = &category {
            if !self.session.categories().iter().any(|c| c == name) {
                anyhow::bail!(
                    "No category '{}'. Available categories:\n{}",
                    name,
                    self.session
                        .categories()
                        .iter()
                        .map(|c| format!("  - {}", c))
                        .collect::<Vec<_>>()
                        .join("\n")
                );
            }
        }

        self.session.set_category(category);
        self.session.set_query(filter.query.clone());
        Ok(())
    }
}

/// Load the config named on the command line, else the default file.
///
/// Without a config directory there is no default file to read, so the
/// defaults apply.
fn load_config(
    explicit: Option<&Path>,
    default_path: impl FnOnce() -> Result<PathBuf, ConfigError>,
) -> Result<AppConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}, using default settings", e);
                return Ok(AppConfig::default());
            }
        },
    };

    AppConfig::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_dir_uses_defaults() {
        let config = load_config(None, || Err(ConfigError::ConfigDirNotFound)).unwrap();
        assert_eq!(config.practice.max_redraws, AppConfig::default().practice.max_redraws);
        assert_eq!(config.storage.library_key, "library");
    }

    #[test]
    fn test_explicit_config_is_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[practice]\nmax_redraws = 2\n").unwrap();

        let config = load_config(Some(&path), || Err(ConfigError::ConfigDirNotFound)).unwrap();
        assert_eq!(config.practice.max_redraws, 2);
    }

    #[test]
    fn test_broken_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "practice = [").unwrap();

        assert!(load_config(Some(&path), || Err(ConfigError::ConfigDirNotFound)).is_err());
    }

    #[test]
    fn test_ephemeral_app_without_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let options = AppOptions {
            data_dir: None,
            config: Some(temp_dir.path().join("missing.toml")),
            ephemeral: true,
        };
        let app = App::new(&options).unwrap();
        assert!(app.data_dir.is_none());
        assert_eq!(app.session.library().len(), 13);
    }
}
