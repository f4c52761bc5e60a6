//! Configuration loading and management
//!
//! Settings live in `~/.questa/config.toml`. A missing file means
//! defaults; `questa init` writes a starter file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::store::DataStore;

fn default_tick_ms() -> u64 {
    250
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where quests.json and player.json live; defaults to ~/.questa/
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// TUI poll interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Show hidden badges in the locked listing (they always show once
    /// unlocked)
    #[serde(default)]
    pub show_hidden_badges: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            tick_ms: default_tick_ms(),
            show_hidden_badges: false,
        }
    }
}

impl Config {
    /// Get the global config directory path (~/.questa/)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".questa")
    }

    /// Get the global config file path (~/.questa/config.toml)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load the global config, falling back to defaults if none exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration with atomic write and file locking
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("failed to serialize config")?;

        // Separate lock file so the rename below never clobbers the lock
        let lock_path = path.with_extension("toml.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("failed to create lock file: {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .context("failed to acquire config lock")?;

        let temp_path = path.with_extension("toml.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
        temp_file
            .write_all(content.as_bytes())
            .context("failed to write config content")?;
        temp_file.sync_all().context("failed to sync config file")?;

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("failed to rename config file: {}", path.display()))?;

        // Lock is released when lock_file is dropped
        Ok(())
    }

    /// Write a starter config file for `questa init`
    pub fn init(force: bool) -> Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() && !force {
            anyhow::bail!(
                "config already exists at {} (use --force to overwrite)",
                path.display()
            );
        }
        Config::default().save_to_file(&path)?;
        Ok(path)
    }

    /// The effective data directory, honoring the config override
    pub fn effective_data_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(dir) = cli_override {
            return dir.to_path_buf();
        }
        self.data_dir
            .clone()
            .unwrap_or_else(DataStore::default_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.tick_ms, 250);
        assert!(config.data_dir.is_none());
        assert!(!config.show_hidden_badges);
    }

    #[test]
    fn config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/questa-test")),
            tick_ms: 100,
            show_hidden_badges: true,
        };
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.tick_ms, 100);
        assert!(loaded.show_hidden_badges);
        assert_eq!(loaded.data_dir.as_deref(), Some(Path::new("/tmp/questa-test")));
    }

    #[test]
    fn partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tick_ms = 500\n").unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.tick_ms, 500);
        assert!(loaded.data_dir.is_none());
    }

    #[test]
    fn cli_override_wins_over_config_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };
        let effective = config.effective_data_dir(Some(Path::new("/from/cli")));
        assert_eq!(effective, PathBuf::from("/from/cli"));
        assert_eq!(
            config.effective_data_dir(None),
            PathBuf::from("/from/config")
        );
    }
}
