//! Error types for backup, storage and Discord operations.
//!
//! `AppError` is the top-level error returned by every fallible public function in the
//! crate. Domain-specific failures (configuration) live in their own modules and are
//! wrapped via `#[from]`, while storage lookups and target validation use the message
//! carrying variants so callers get a short human readable reason.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur while capturing, storing or
/// restoring a backup. Most variants use `#[from]` for automatic error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error while loading environment variables.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// HTTP client error from reqwest, raised while downloading guild media.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Filesystem error from the backup store.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Backup document could not be serialized or parsed.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// No backup matching the requested id and owner scope.
    ///
    /// # Fields
    /// - Message describing what was not found
    #[error("{0}")]
    NotFound(String),

    /// Restore was requested without a usable target guild.
    ///
    /// # Fields
    /// - Message describing why the target was rejected
    #[error("{0}")]
    InvalidTarget(String),

    /// Caller supplied a value that cannot be used, such as a backup id containing
    /// path separators.
    #[error("{0}")]
    BadRequest(String),

    /// Opaque failure reported by a remote guild client that is not backed by Serenity.
    #[error("{0}")]
    RemoteCall(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
