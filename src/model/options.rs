//! Operation-specific parameter types for capture and restore.

use std::collections::HashSet;

use crate::model::snapshot::Snapshot;

/// Collections that can be left out of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackupCategory {
    Bans,
    Roles,
    Emojis,
    Channels,
}

/// How guild media (icon, splash, banner, emojis) is stored in a backup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaMode {
    /// Store the CDN URL only.
    #[default]
    Url,
    /// Store the URL and the downloaded image as a base64 `data:` URI.
    Embed,
}

/// Parameters for capturing a guild.
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    /// Explicit backup id. Generated from the owner scope when absent.
    pub backup_id: Option<String>,
    /// Persist the snapshot to the backup store.
    pub json_save: bool,
    /// Pretty-print the stored JSON.
    pub json_beautify: bool,
    pub save_members: bool,
    pub do_not_backup: HashSet<BackupCategory>,
    pub media_mode: MediaMode,
    pub owner_scope: String,
}

impl CaptureOptions {
    pub fn excludes(&self, category: BackupCategory) -> bool {
        self.do_not_backup.contains(&category)
    }
}

/// Parameters for restoring a backup.
#[derive(Debug, Clone)]
pub struct RestoreOptions {
    pub clear_guild_before_restore: bool,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            clear_guild_before_restore: true,
        }
    }
}

/// Backup to restore, either supplied directly or looked up by id in the store.
#[derive(Debug, Clone)]
pub enum BackupSource {
    Snapshot(Box<Snapshot>),
    Id(String),
}

impl From<Snapshot> for BackupSource {
    fn from(snapshot: Snapshot) -> Self {
        Self::Snapshot(Box::new(snapshot))
    }
}

impl From<&str> for BackupSource {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for BackupSource {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}
