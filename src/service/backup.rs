use std::path::Path;

use crate::{
    data::BackupRepository,
    discord::GuildClient,
    error::AppError,
    model::{BackupInfo, BackupSource, CaptureOptions, RestoreOptions, Snapshot},
    service::{capture::CaptureService, clear::GuildClearService, restore::RestoreService},
};

/// Public entry point for creating, loading and managing backups.
///
/// The service owns its backup store. `set_storage_folder` swaps the store for all
/// later calls on this instance only.
#[derive(Debug, Clone)]
pub struct BackupService {
    repo: BackupRepository,
}

impl BackupService {
    /// Creates a service storing backups under `root`.
    ///
    /// # Returns
    /// - `Ok(BackupService)` - Storage directory exists or was created
    /// - `Err(AppError::IoErr)` - Storage directory could not be created
    pub fn new(root: impl AsRef<Path>) -> Result<Self, AppError> {
        Ok(Self {
            repo: BackupRepository::new(root)?,
        })
    }

    pub fn repository(&self) -> &BackupRepository {
        &self.repo
    }

    /// Captures the client's guild, saving it when `options.json_save` is set.
    pub async fn create(
        &self,
        client: &dyn GuildClient,
        options: &CaptureOptions,
    ) -> Result<Snapshot, AppError> {
        CaptureService::new(client, &self.repo)
            .capture(options)
            .await
    }

    /// Gets a stored backup together with its size.
    ///
    /// # Returns
    /// - `Ok(BackupInfo)` - The backup, its id and its size in KiB
    /// - `Err(AppError::NotFound)` - No backup with this id for `owner_scope`
    pub async fn fetch(&self, owner_scope: &str, id: &str) -> Result<BackupInfo, AppError> {
        let (data, size) = tokio::try_join!(
            self.repo.get(owner_scope, id),
            self.repo.size_kib(owner_scope, id)
        )?;

        Ok(BackupInfo {
            data,
            id: id.to_string(),
            size,
        })
    }

    /// Restores a backup onto the client's guild.
    ///
    /// The guild is cleared first unless `options.clear_guild_before_restore` is unset.
    ///
    /// # Arguments
    /// - `source` - A snapshot, or the id of a stored backup owned by `owner_scope`
    /// - `client` - Target guild; `None` when the caller could not resolve one
    /// - `options` - Restore behaviour
    /// - `owner_scope` - Owner used to look up `source` when it is an id
    ///
    /// # Returns
    /// - `Ok(Snapshot)` - The snapshot that was restored
    /// - `Err(AppError::InvalidTarget)` - No target guild was given
    /// - `Err(AppError::NotFound)` - No backup with the given id for `owner_scope`
    /// - `Err(AppError)` - A remote call during restore failed
    pub async fn load(
        &self,
        source: impl Into<BackupSource>,
        client: Option<&dyn GuildClient>,
        options: &RestoreOptions,
        owner_scope: &str,
    ) -> Result<Snapshot, AppError> {
        let client = client.ok_or_else(|| AppError::InvalidTarget("Invalid guild".to_string()))?;

        let snapshot = match source.into() {
            BackupSource::Snapshot(snapshot) => *snapshot,
            BackupSource::Id(id) => self.repo.get(owner_scope, &id).await?,
        };

        if options.clear_guild_before_restore {
            GuildClearService::new(client).clear().await;
        }

        RestoreService::new(client).restore(&snapshot).await?;

        Ok(snapshot)
    }

    /// Deletes a stored backup.
    ///
    /// # Returns
    /// - `Ok(())` - Backup removed
    /// - `Err(AppError::NotFound)` - No backup with this id for `owner_scope`
    pub async fn remove(&self, owner_scope: &str, id: &str) -> Result<(), AppError> {
        self.repo.delete(owner_scope, id).await?;
        tracing::info!("Removed backup {}", id);

        Ok(())
    }

    /// Lists ids of the backups owned by `owner_scope`.
    pub async fn list(&self, owner_scope: &str) -> Result<Vec<String>, AppError> {
        self.repo.list(owner_scope).await
    }

    /// Moves backup storage to `path` for all later calls, creating the directory if
    /// absent. Existing backups are not moved.
    pub fn set_storage_folder(&mut self, path: impl AsRef<Path>) -> Result<(), AppError> {
        self.repo = BackupRepository::new(path)?;
        tracing::debug!("Backup storage set to {}", self.repo.root().display());

        Ok(())
    }
}
