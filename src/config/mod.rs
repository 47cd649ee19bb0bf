//! Configuration management for cachedisk

pub mod schema;

pub use schema::Config;

use crate::error::{CacheDiskError, CacheDiskResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = ".cachedisk.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cachedisk")
            .join("config.toml")
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> CacheDiskResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path).await.map_err(|e| {
            CacheDiskError::io(
                format!("reading config from {}", self.config_path.display()),
                e,
            )
        })?;

        toml::from_str(&content).map_err(|e| CacheDiskError::ConfigInvalid {
            path: self.config_path.clone(),
            reason: e.to_string(),
        })
    }

    /// Load configuration with an optional project-local file overlaid
    /// key-by-key on top of the global one
    pub async fn load_merged(&self, local: Option<&Path>) -> CacheDiskResult<Config> {
        let mut merged = Self::load_value(&self.config_path)
            .await?
            .unwrap_or_else(empty_table);

        if let Some(local_path) = local {
            if let Some(overlay) = Self::load_value(local_path).await? {
                debug!("Overlaying local config from {}", local_path.display());
                overlay_tables(&mut merged, overlay);
            }
        }

        merged.try_into().map_err(|e| CacheDiskError::ConfigInvalid {
            path: self.config_path.clone(),
            reason: e.to_string(),
        })
    }

    /// Read one config file as a TOML value, or `None` when it is missing
    async fn load_value(path: &Path) -> CacheDiskResult<Option<toml::Value>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| CacheDiskError::io(format!("reading config from {}", path.display()), e))?;

        let value: toml::Value =
            toml::from_str(&content).map_err(|e| CacheDiskError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        // Surface type errors against the file they live in, not the merge
        let _: Config = value
            .clone()
            .try_into()
            .map_err(|e| CacheDiskError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Some(value))
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> CacheDiskResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            CacheDiskError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> CacheDiskResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CacheDiskError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Walk up from `start` looking for a project-local config file
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_table() -> toml::Value {
    toml::Value::Table(toml::map::Map::new())
}

fn overlay_tables(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) if existing.is_table() && value.is_table() => {
                        overlay_tables(existing, value);
                    }
                    _ => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base_slot, overlay_value) => *base_slot = overlay_value,
    }
}
