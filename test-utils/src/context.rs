use std::path::Path;

use tempfile::TempDir;

use crate::error::TestError;

/// Test context owning a temporary backup storage directory.
///
/// The directory is created lazily on first access and removed when the context is
/// dropped, so each test gets an isolated store.
pub struct TestContext {
    /// Optional temporary directory used as backup storage root.
    ///
    /// Initialized lazily when `storage()` is first called.
    pub storage: Option<TempDir>,
}

impl TestContext {
    /// Creates a new empty test context with no storage directory.
    pub fn new() -> Self {
        Self { storage: None }
    }

    /// Gets or creates the temporary storage directory.
    ///
    /// # Returns
    /// - `Ok(&Path)` - Path of the storage directory
    /// - `Err(TestError::Io)` - Failed to create the temporary directory
    pub fn storage(&mut self) -> Result<&Path, TestError> {
        match self.storage {
            Some(ref dir) => Ok(dir.path()),
            None => {
                let dir = tempfile::tempdir()?;

                let dir_ref = self.storage.insert(dir);

                Ok(dir_ref.path())
            }
        }
    }

    /// Path of the storage directory if it has been created.
    pub fn storage_dir(&self) -> Option<&Path> {
        self.storage.as_ref().map(|dir| dir.path())
    }

    /// Writes a backup document into the storage directory as `<id>.json`.
    ///
    /// # Arguments
    /// - `document` - Backup document; its `id` field names the file
    ///
    /// # Returns
    /// - `Ok(())` - Document written
    /// - `Err(TestError)` - Directory could not be created or file not written
    pub fn with_backup(&mut self, document: &serde_json::Value) -> Result<(), TestError> {
        let id = document
            .get("id")
            .and_then(|id| id.as_str())
            .unwrap_or_default()
            .to_string();
        let dir = self.storage()?;

        std::fs::write(
            dir.join(format!("{}.json", id)),
            serde_json::to_vec(document)?,
        )?;

        Ok(())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
