//! Best-effort teardown of a guild before a restore.
//!
//! Every deletion is wrapped in `ignore_error`: resources the bot cannot remove, such
//! as integration-managed roles or channels above its permissions, are left in place
//! and the sweep moves on. The step as a whole never fails.

use futures::future::join_all;

use crate::{
    discord::{serenity_client::DEFAULT_AFK_TIMEOUT, GuildClient},
    model::guild::{EditGuildParam, GuildInfo, FEATURE_COMMUNITY},
    util::best_effort::ignore_error,
};

/// Suppress join, boost and setup-tip messages in the system channel.
const SUPPRESS_SYSTEM_CHANNEL_FLAGS: u64 = 0b111;

pub struct GuildClearService<'a> {
    client: &'a dyn GuildClient,
}

impl<'a> GuildClearService<'a> {
    pub fn new(client: &'a dyn GuildClient) -> Self {
        Self { client }
    }

    /// Deletes roles, channels, emojis, webhooks and bans, then resets guild settings
    /// to their defaults.
    ///
    /// The default role and managed roles are never deleted. Verification level and
    /// explicit content filter are left alone on community guilds, where Discord
    /// requires them to stay enabled.
    pub async fn clear(&self) {
        tracing::info!("Clearing guild {}", self.client.guild_id());

        let guild = ignore_error("fetch guild", self.client.guild()).await;

        tokio::join!(
            self.clear_roles(),
            self.clear_channels(),
            self.clear_emojis(),
            self.clear_webhooks(),
            self.clear_bans(),
        );

        ignore_error(
            "reset guild settings",
            self.client.edit_guild(default_settings(guild.as_ref())),
        )
        .await;
        ignore_error("disable widget", self.client.edit_widget(false, None)).await;

        tracing::info!("Cleared guild {}", self.client.guild_id());
    }

    async fn clear_roles(&self) {
        let Some(roles) = ignore_error("list roles", self.client.roles()).await else {
            return;
        };
        let default_role_id = self.client.guild_id();

        let deletions = roles
            .iter()
            .filter(|role| !role.managed && role.role_id != default_role_id)
            .map(|role| ignore_error("delete role", self.client.delete_role(role.role_id)));
        let deleted = join_all(deletions).await.into_iter().flatten().count();

        tracing::debug!("Deleted {} roles", deleted);
    }

    async fn clear_channels(&self) {
        let Some(channels) = ignore_error("list channels", self.client.channels()).await else {
            return;
        };

        let deletions = channels.iter().map(|channel| {
            ignore_error("delete channel", self.client.delete_channel(channel.channel_id))
        });
        let deleted = join_all(deletions).await.into_iter().flatten().count();

        tracing::debug!("Deleted {} channels", deleted);
    }

    async fn clear_emojis(&self) {
        let Some(emojis) = ignore_error("list emojis", self.client.emojis()).await else {
            return;
        };

        let deletions = emojis
            .iter()
            .map(|emoji| ignore_error("delete emoji", self.client.delete_emoji(emoji.emoji_id)));
        join_all(deletions).await;
    }

    async fn clear_webhooks(&self) {
        let Some(webhooks) = ignore_error("list webhooks", self.client.webhooks()).await else {
            return;
        };

        let deletions = webhooks.iter().map(|webhook| {
            ignore_error("delete webhook", self.client.delete_webhook(webhook.webhook_id))
        });
        join_all(deletions).await;
    }

    async fn clear_bans(&self) {
        let Some(bans) = ignore_error("list bans", self.client.bans()).await else {
            return;
        };

        let deletions = bans
            .iter()
            .map(|ban| ignore_error("remove ban", self.client.unban(ban.user_id)));
        join_all(deletions).await;
    }
}

/// Neutral guild settings applied after the sweep.
fn default_settings(guild: Option<&GuildInfo>) -> EditGuildParam {
    let community = guild.is_some_and(|guild| guild.has_feature(FEATURE_COMMUNITY));

    EditGuildParam {
        verification_level: (!community).then_some(0),
        explicit_content_filter: (!community).then_some(0),
        default_message_notifications: Some(0),
        afk_channel_id: Some(None),
        afk_timeout: Some(DEFAULT_AFK_TIMEOUT),
        icon: Some(None),
        splash: Some(None),
        banner: Some(None),
        system_channel_id: Some(None),
        system_channel_flags: Some(SUPPRESS_SYSTEM_CHANNEL_FLAGS),
        ..Default::default()
    }
}
