use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with pre-seeded backup storage.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::{builder::TestBuilder, fixture};
///
/// let test = TestBuilder::new()
///     .with_backup(fixture::snapshot::document("1owner"))
///     .with_backup(fixture::snapshot::document("2owner"))
///     .build()?;
/// ```
pub struct TestBuilder {
    /// Backup documents written to storage during `build()`, in insertion order.
    backups: Vec<serde_json::Value>,
}

impl TestBuilder {
    /// Creates a new test builder with empty storage.
    pub fn new() -> Self {
        Self {
            backups: Vec::new(),
        }
    }

    /// Adds a backup document to seed into storage.
    ///
    /// # Arguments
    /// - `document` - Backup document JSON; the `id` field names the stored file
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_backup(mut self, document: serde_json::Value) -> Self {
        self.backups.push(document);
        self
    }

    /// Builds the test context, creating the storage directory and seeded files.
    ///
    /// The storage directory is always created, even when no backups were added.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with storage ready
    /// - `Err(TestError)` - Failed to create the directory or write a seeded backup
    pub fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();
        setup.storage()?;

        for backup in &self.backups {
            setup.with_backup(backup)?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
