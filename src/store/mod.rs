//! JSON persistence for quests and the player profile
//!
//! Two files live in the data directory: `quests.json` and `player.json`.
//! Every save is atomic (temp file + rename) under an exclusive lock, and
//! the previous file is copied to a `.backup` first so a corrupt save can
//! be recovered on the next load.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{Player, Quest};
use crate::stats::achievements::UnlockRecord;

const CURRENT_VERSION: &str = "1.0";
const BACKUP_SUFFIX: &str = "backup";

/// On-disk envelope for the quests file
#[derive(Debug, Serialize, Deserialize)]
struct QuestsFile {
    version: String,
    last_modified: DateTime<Utc>,
    quests: HashMap<String, Quest>,
}

/// On-disk envelope for the player file
#[derive(Debug, Serialize, Deserialize)]
struct PlayerFile {
    version: String,
    last_modified: DateTime<Utc>,
    player: Player,
    #[serde(default)]
    unlocked: Vec<UnlockRecord>,
}

/// File-backed store rooted at a data directory
#[derive(Debug, Clone)]
pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    /// Default data directory: `~/.questa/`
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".questa")
    }

    /// Open a store, creating the data directory if needed
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir).with_context(|| {
            format!("failed to create data directory: {}", data_dir.display())
        })?;

        debug!(dir = %data_dir.display(), "data store opened");
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn quests_path(&self) -> PathBuf {
        self.data_dir.join("quests.json")
    }

    fn player_path(&self) -> PathBuf {
        self.data_dir.join("player.json")
    }

    /// Load all quests; a missing file means an empty log.
    ///
    /// Corrupt JSON triggers one restore-from-backup attempt before giving
    /// up. Entries that fail to deserialize individually are skipped by
    /// serde as part of the envelope, so a bad file is all-or-nothing.
    pub fn load_quests(&self) -> Result<HashMap<String, Quest>> {
        let path = self.quests_path();
        if !path.exists() {
            debug!("quests file does not exist, starting empty");
            return Ok(HashMap::new());
        }

        let file = match self.read_envelope::<QuestsFile>(&path) {
            Ok(file) => file,
            Err(e) => {
                warn!("quests file unreadable ({e:#}), trying backup");
                restore_from_backup(&path)?;
                self.read_envelope::<QuestsFile>(&path)
                    .context("quests file and its backup are both unreadable")?
            }
        };

        info!(count = file.quests.len(), "loaded quests");
        Ok(file.quests)
    }

    /// Save all quests atomically, backing up the previous file
    pub fn save_quests(&self, quests: &HashMap<String, Quest>) -> Result<()> {
        let envelope = QuestsFile {
            version: CURRENT_VERSION.to_string(),
            last_modified: Utc::now(),
            quests: quests.clone(),
        };
        self.write_envelope(&self.quests_path(), &envelope)?;
        debug!(count = quests.len(), "saved quests");
        Ok(())
    }

    /// Load the player profile and its unlock records.
    ///
    /// A missing file yields a fresh profile. A corrupt file tries the
    /// backup; if that also fails, the caller gets a fresh profile rather
    /// than an error, matching the "start fresh" recovery policy.
    pub fn load_player(&self) -> Result<(Player, Vec<UnlockRecord>)> {
        let path = self.player_path();
        if !path.exists() {
            debug!("player file does not exist, starting fresh");
            return Ok((Player::new(), Vec::new()));
        }

        let file = match self.read_envelope::<PlayerFile>(&path) {
            Ok(file) => file,
            Err(e) => {
                warn!("player file unreadable ({e:#}), trying backup");
                if restore_from_backup(&path).is_err() {
                    warn!("no usable backup, starting with a fresh profile");
                    return Ok((Player::new(), Vec::new()));
                }
                match self.read_envelope::<PlayerFile>(&path) {
                    Ok(file) => file,
                    Err(e) => {
                        warn!("player backup also unreadable ({e:#}), starting fresh");
                        return Ok((Player::new(), Vec::new()));
                    }
                }
            }
        };

        info!(level = file.player.level(), "loaded player profile");
        Ok((file.player, file.unlocked))
    }

    /// Save the player profile and unlock records atomically
    pub fn save_player(&self, player: &Player, unlocked: &[UnlockRecord]) -> Result<()> {
        let envelope = PlayerFile {
            version: CURRENT_VERSION.to_string(),
            last_modified: Utc::now(),
            player: player.clone(),
            unlocked: unlocked.to_vec(),
        };
        self.write_envelope(&self.player_path(), &envelope)?;
        debug!("saved player profile");
        Ok(())
    }

    fn read_envelope<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Write a file with backup, exclusive lock, and atomic rename
    fn write_envelope<T: Serialize>(&self, path: &Path, envelope: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(envelope)
            .with_context(|| format!("failed to serialize {}", path.display()))?;

        if path.exists() {
            let backup = backup_path(path);
            if let Err(e) = std::fs::copy(path, &backup) {
                warn!("failed to back up {}: {e}", path.display());
            }
        }

        // Separate lock file so the rename below never clobbers the lock
        let lock_path = path.with_extension("json.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("failed to create lock file: {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .context("failed to acquire data file lock")?;

        let temp_path = path.with_extension("json.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
        temp_file
            .write_all(content.as_bytes())
            .context("failed to write data file")?;
        temp_file.sync_all().context("failed to sync data file")?;

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("failed to rename into place: {}", path.display()))?;

        // Lock is released when lock_file is dropped
        Ok(())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    path.with_extension(format!("json.{BACKUP_SUFFIX}"))
}

fn restore_from_backup(path: &Path) -> Result<()> {
    let backup = backup_path(path);
    if !backup.exists() {
        anyhow::bail!("no backup exists for {}", path.display());
    }
    std::fs::copy(&backup, path)
        .with_context(|| format!("failed to restore {} from backup", path.display()))?;
    info!("restored {} from backup", path.display());
    Ok(())
}
