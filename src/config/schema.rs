//! Configuration schema for cachedisk
//!
//! Configuration is stored at `~/.config/cachedisk/config.toml`, with an
//! optional project-local `.cachedisk.toml` overlaid on top

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Volume preferences and cache directory layout
    pub cache: CacheConfig,

    /// Environment export settings
    pub export: ExportConfig,
}

/// Cache resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Volume names in preference order
    pub volumes: Vec<String>,

    /// Relative directory created on the chosen volume
    pub dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            volumes: vec![],
            dir: "_caches".to_string(),
        }
    }
}

/// Environment export settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Variable names written by `resolve --export`
    pub vars: Vec<String>,
}
