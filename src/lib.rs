//! Discord guild backup and restore.
//!
//! Captures a guild's structure and settings (roles, channels with their threads and
//! permission overwrites, emojis, bans, members and media) into a portable JSON
//! snapshot, stores snapshots on disk, and replays them onto a live guild.
//!
//! # Usage
//!
//! ```rust,ignore
//! use guild_backup::{discord::SerenityGuildClient, model::CaptureOptions, startup};
//!
//! startup::init_tracing();
//! let config = startup::load_config()?;
//! let service = startup::build_service(&config)?;
//! let client = SerenityGuildClient::new(startup::build_http(&config), guild_id);
//!
//! let options = CaptureOptions {
//!     json_save: true,
//!     owner_scope: config.owner_scope.clone(),
//!     ..Default::default()
//! };
//! let snapshot = service.create(&client, &options).await?;
//! ```

pub mod config;
pub mod data;
pub mod discord;
pub mod error;
pub mod model;
pub mod service;
pub mod startup;
pub mod util;

pub use discord::{GuildClient, SerenityGuildClient};
pub use error::AppError;
pub use service::BackupService;
