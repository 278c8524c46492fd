//! Remote guild access.
//!
//! `GuildClient` is the seam between the backup pipelines and Discord. Every read and
//! mutation the pipelines perform goes through it, scoped to a single guild. The
//! production implementation, `SerenityGuildClient`, wraps Serenity's HTTP client.

pub mod media;
pub mod serenity_client;

#[cfg(test)]
mod test;

use serenity::async_trait;

use crate::{
    error::AppError,
    model::guild::{
        CreateChannelParam, CreateRoleParam, CreateThreadParam, EditGuildParam, GuildBan,
        GuildChannelInfo, GuildEmoji, GuildInfo, GuildMember, GuildRole, GuildWebhook,
        MediaPayload, ThreadInfo,
    },
};

pub use serenity_client::SerenityGuildClient;

/// Read and write access to one remote guild.
#[async_trait]
pub trait GuildClient: Send + Sync {
    /// Id of the guild this client operates on. The default role shares this id.
    fn guild_id(&self) -> u64;

    async fn guild(&self) -> Result<GuildInfo, AppError>;
    async fn roles(&self) -> Result<Vec<GuildRole>, AppError>;
    /// All channels in the guild, threads excluded.
    async fn channels(&self) -> Result<Vec<GuildChannelInfo>, AppError>;
    /// Active (non archived) threads across the guild.
    async fn active_threads(&self) -> Result<Vec<ThreadInfo>, AppError>;
    async fn emojis(&self) -> Result<Vec<GuildEmoji>, AppError>;
    async fn bans(&self) -> Result<Vec<GuildBan>, AppError>;
    async fn webhooks(&self) -> Result<Vec<GuildWebhook>, AppError>;
    async fn members(&self) -> Result<Vec<GuildMember>, AppError>;
    /// Downloads a media file such as a guild icon or emoji image.
    async fn fetch_media(&self, url: &str) -> Result<MediaPayload, AppError>;

    async fn create_role(&self, param: CreateRoleParam) -> Result<GuildRole, AppError>;
    async fn edit_role(&self, role_id: u64, param: CreateRoleParam)
        -> Result<GuildRole, AppError>;
    async fn delete_role(&self, role_id: u64) -> Result<(), AppError>;

    async fn create_channel(&self, param: CreateChannelParam)
        -> Result<GuildChannelInfo, AppError>;
    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError>;
    async fn create_thread(
        &self,
        channel_id: u64,
        param: CreateThreadParam,
    ) -> Result<ThreadInfo, AppError>;

    /// Creates an emoji from an image `data:` URI.
    async fn create_emoji(&self, name: &str, image: &str) -> Result<GuildEmoji, AppError>;
    async fn delete_emoji(&self, emoji_id: u64) -> Result<(), AppError>;

    async fn delete_webhook(&self, webhook_id: u64) -> Result<(), AppError>;

    async fn ban(&self, user_id: u64, reason: Option<&str>) -> Result<(), AppError>;
    async fn unban(&self, user_id: u64) -> Result<(), AppError>;

    async fn edit_guild(&self, param: EditGuildParam) -> Result<(), AppError>;
    async fn edit_widget(&self, enabled: bool, channel_id: Option<u64>) -> Result<(), AppError>;
}
