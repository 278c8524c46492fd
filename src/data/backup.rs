//! Backup repository for filesystem storage.
//!
//! This module provides the `BackupRepository` for storing backup documents as flat
//! JSON files, one `<id>.json` per backup, in a single directory. Ids are namespaced
//! by owner scope: a backup belongs to an owner when its id contains the owner's scope
//! token, and every lookup filters on that convention.
//!
//! The repository does no locking. Concurrent writers to the same id race and the
//! last write wins.

use std::path::{Path, PathBuf};

use crate::{error::AppError, model::snapshot::Snapshot};

const EXTENSION: &str = "json";

/// Repository for backup documents stored on disk.
#[derive(Debug, Clone)]
pub struct BackupRepository {
    /// Directory holding the backup files.
    root: PathBuf,
}

impl BackupRepository {
    /// Creates a repository rooted at `root`, creating the directory if absent.
    ///
    /// Trailing path separators are stripped from `root`.
    ///
    /// # Arguments
    /// - `root` - Directory to store backups in
    ///
    /// # Returns
    /// - `Ok(BackupRepository)` - Repository ready for use
    /// - `Err(AppError::IoErr)` - Directory could not be created
    pub fn new(root: impl AsRef<Path>) -> Result<Self, AppError> {
        let root = strip_trailing_separators(root.as_ref());
        std::fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a backup under its id, replacing any existing document.
    ///
    /// # Arguments
    /// - `snapshot` - Backup to store
    /// - `pretty` - Pretty-print the JSON
    ///
    /// # Returns
    /// - `Ok(())` - Backup written
    /// - `Err(AppError::BadRequest)` - Id cannot be used as a file name
    /// - `Err(AppError::IoErr)` / `Err(AppError::JsonErr)` - Write or serialization failure
    pub async fn put(&self, snapshot: &Snapshot, pretty: bool) -> Result<(), AppError> {
        if !is_valid_id(&snapshot.id) {
            return Err(AppError::BadRequest(format!(
                "Invalid backup id '{}'",
                snapshot.id
            )));
        }

        let content = if pretty {
            serde_json::to_vec_pretty(snapshot)?
        } else {
            serde_json::to_vec(snapshot)?
        };

        tokio::fs::write(self.path_for(&snapshot.id), content).await?;

        Ok(())
    }

    /// Reads a backup owned by `owner_scope`.
    ///
    /// # Returns
    /// - `Ok(Snapshot)` - The stored backup
    /// - `Err(AppError::NotFound)` - No backup with this id, or the id does not
    ///   contain `owner_scope`
    /// - `Err(AppError::JsonErr)` - Stored file is not a valid backup
    pub async fn get(&self, owner_scope: &str, id: &str) -> Result<Snapshot, AppError> {
        let content = self.read_owned(owner_scope, id).await?;

        Ok(serde_json::from_slice(&content)?)
    }

    /// Returns the size of a stored backup in KiB.
    ///
    /// # Returns
    /// - `Ok(f64)` - File size divided by 1024
    /// - `Err(AppError::NotFound)` - No matching backup for this owner
    pub async fn size_kib(&self, owner_scope: &str, id: &str) -> Result<f64, AppError> {
        if !self.owns(owner_scope, id) {
            return Err(not_found());
        }

        match tokio::fs::metadata(self.path_for(id)).await {
            Ok(metadata) => Ok(metadata.len() as f64 / 1024.0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists ids of every backup owned by `owner_scope`, sorted ascending.
    pub async fn list(&self, owner_scope: &str) -> Result<Vec<String>, AppError> {
        let mut ids = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }

            if let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) {
                if id.contains(owner_scope) {
                    ids.push(id.to_string());
                }
            }
        }

        ids.sort();

        Ok(ids)
    }

    /// Deletes a backup owned by `owner_scope`.
    ///
    /// # Returns
    /// - `Ok(())` - Backup removed
    /// - `Err(AppError::NotFound)` - No matching backup for this owner; nothing removed
    pub async fn delete(&self, owner_scope: &str, id: &str) -> Result<(), AppError> {
        if !self.owns(owner_scope, id) {
            return Err(not_found());
        }

        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_owned(&self, owner_scope: &str, id: &str) -> Result<Vec<u8>, AppError> {
        if !self.owns(owner_scope, id) {
            return Err(not_found());
        }

        match tokio::fs::read(self.path_for(id)).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }

    fn owns(&self, owner_scope: &str, id: &str) -> bool {
        is_valid_id(id) && id.contains(owner_scope)
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", id, EXTENSION))
    }
}

fn not_found() -> AppError {
    AppError::NotFound("No backup found".to_string())
}

/// Ids become file names, so they must not be able to escape the storage directory.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && id != "." && id != ".."
}

fn strip_trailing_separators(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim_end_matches(['/', '\\']);

    if trimmed.is_empty() {
        // Root directory
        path.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}
