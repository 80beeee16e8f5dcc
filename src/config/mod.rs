//! Store configuration loaded from `~/.chukfi/config.toml`.
//!
//! The file is optional; every field falls back to its default, which
//! reproduces the storage keys the browser build has always used.

use crate::entity::EntityKind;
use crate::lifecycle::DEFAULT_RETENTION_DAYS;
use crate::utils::get_chukfi_home;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Storage key per entity kind (`[storage.keys]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StorageKeys {
    pub pages: String,
    pub posts: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            pages: EntityKind::Page.default_storage_key().to_string(),
            posts: EntityKind::Post.default_storage_key().to_string(),
        }
    }
}

impl StorageKeys {
    #[must_use]
    pub fn key_for(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Page => &self.pages,
            EntityKind::Post => &self.posts,
        }
    }
}

/// `[storage]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per key. Defaults to `~/.chukfi/data`.
    pub data_dir: Option<PathBuf>,
    pub keys: StorageKeys,
}

/// `[trash]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrashConfig {
    /// Days a record stays in the trash before `purge-expired` removes it
    pub retention_days: u32,
}

impl Default for TrashConfig {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub trash: TrashConfig,
}

impl StoreConfig {
    /// Configured data directory, or `~/.chukfi/data`.
    #[must_use]
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(|| get_chukfi_home().join("data"))
    }
}

#[must_use]
pub fn config_path() -> PathBuf {
    get_chukfi_home().join("config.toml")
}

/// Load `~/.chukfi/config.toml`, or defaults when it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_config() -> Result<StoreConfig, ConfigError> {
    load_config_from(&config_path())
}

/// Load configuration from an explicit path, or defaults when it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_config_from(path: &Path) -> Result<StoreConfig, ConfigError> {
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(StoreConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: StoreConfig = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_toml_produces_defaults() {
        let cfg: StoreConfig = toml::from_str("").expect("Should parse empty TOML");
        assert_eq!(cfg, StoreConfig::default());
        assert_eq!(cfg.storage.keys.pages, "chukfi_pages");
        assert_eq!(cfg.storage.keys.posts, "chukfi_blog_posts");
        assert_eq!(cfg.trash.retention_days, 30);
    }

    #[test]
    fn test_partial_tables_keep_other_defaults() {
        let toml_str = "[storage.keys]\nposts = \"site_posts\"\n\n[trash]\nretention_days = 7\n";
        let cfg: StoreConfig = toml::from_str(toml_str).expect("Should parse");

        assert_eq!(cfg.storage.keys.key_for(EntityKind::Post), "site_posts");
        assert_eq!(cfg.storage.keys.key_for(EntityKind::Page), "chukfi_pages");
        assert_eq!(cfg.trash.retention_days, 7);
        assert!(cfg.storage.data_dir.is_none());
    }

    #[test]
    fn test_unknown_key_table_entry_rejected() {
        let result: Result<StoreConfig, _> = toml::from_str("[storage.keys]\ncomments = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let cfg: StoreConfig =
            toml::from_str("[storage]\ndata_dir = \"/srv/chukfi\"\n").expect("Should parse");
        assert_eq!(cfg.resolve_data_dir(), PathBuf::from("/srv/chukfi"));
    }

    #[test]
    fn test_default_data_dir_under_chukfi_home() {
        let dir = StoreConfig::default().resolve_data_dir();
        assert!(dir.ends_with(".chukfi/data"));
    }

    #[test]
    fn test_load_from_absent_file_is_default() {
        let dir = tempdir().expect("tempdir");
        let cfg = load_config_from(&dir.path().join("config.toml")).expect("defaults");
        assert_eq!(cfg, StoreConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "# chukfi\n[trash]\nretention_days = 14\n").expect("write config");

        let cfg = load_config_from(&path).expect("parse config");
        assert_eq!(cfg.trash.retention_days, 14);
    }

    #[test]
    fn test_load_from_invalid_file_errors() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[trash\nretention_days = ").expect("write config");

        assert!(matches!(load_config_from(&path), Err(ConfigError::Toml(_))));
    }
}
