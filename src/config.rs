use std::path::PathBuf;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_STORAGE_DIR: &str = "backups";

pub struct Config {
    pub discord_bot_token: String,

    /// Directory holding one `<id>.json` file per backup.
    pub storage_dir: PathBuf,
    /// Owner scope used to namespace backup ids. Empty matches every backup.
    pub owner_scope: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            storage_dir: std::env::var("BACKUP_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_DIR)),
            owner_scope: std::env::var("BACKUP_OWNER_SCOPE").unwrap_or_default(),
        })
    }
}
