use thiserror::Error;

/// Errors that can occur while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Temporary storage directory or seeded backup file could not be written.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Seeded backup document could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
