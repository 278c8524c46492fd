use std::sync::Arc;

use serenity::http::Http;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::AppError, service::BackupService};

const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global tracing subscriber.
///
/// The filter is read from `RUST_LOG`, falling back to `info`. Calling this more than
/// once keeps the first subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Loads `.env` if present and reads the configuration from the environment.
pub fn load_config() -> Result<Config, AppError> {
    dotenvy::dotenv().ok();

    Config::from_env()
}

/// Creates the Discord HTTP client authenticated with the bot token.
///
/// The client is wrapped in an `Arc` so one instance can back a `SerenityGuildClient`
/// per guild.
pub fn build_http(config: &Config) -> Arc<Http> {
    Arc::new(Http::new(&config.discord_bot_token))
}

/// Creates the backup service rooted at the configured storage directory.
///
/// # Returns
/// - `Ok(BackupService)` - Service ready for use
/// - `Err(AppError::IoErr)` - Storage directory could not be created
pub fn build_service(config: &Config) -> Result<BackupService, AppError> {
    let service = BackupService::new(&config.storage_dir)?;
    tracing::info!(
        "Backup storage at {}",
        service.repository().root().display()
    );

    Ok(service)
}
