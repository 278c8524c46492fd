//! `GuildClient` implementation backed by Serenity's HTTP client.
//!
//! Converts between Serenity's API models and the crate's guild models at the client
//! boundary so the backup pipelines never handle Serenity types directly.

use serde_json::{json, Map, Value};
use serenity::{
    all::{
        AutoArchiveDuration, Ban, ChannelId, ChannelType, CreateChannel, CreateThread, EditRole,
        EditThread, Emoji, EmojiId, GuildChannel, GuildId, Member, PartialGuild,
        PermissionOverwrite, PermissionOverwriteType, Permissions, Role, RoleId, UserId,
        WebhookId,
    },
    async_trait,
    http::{Http, UserPagination},
};
use std::{future::Future, sync::Arc};

use crate::{
    discord::{media, GuildClient},
    error::AppError,
    model::guild::{
        CreateChannelParam, CreateRoleParam, CreateThreadParam, EditGuildParam, GuildBan,
        GuildChannelInfo, GuildChannelKind, GuildEmoji, GuildInfo, GuildMember, GuildOverwrite,
        GuildRole, GuildWebhook, MediaPayload, OverwriteTarget, ThreadInfo,
    },
};

/// Discord's default AFK timeout in seconds.
pub const DEFAULT_AFK_TIMEOUT: u16 = 300;

/// Maximum page size of the list guild members endpoint.
const MEMBER_PAGE_SIZE: u64 = 1000;

/// Largest page of the list guild bans endpoint Serenity can request.
const BAN_PAGE_SIZE: u8 = u8::MAX;

/// Guild client using the Discord REST API through Serenity.
pub struct SerenityGuildClient {
    /// Discord HTTP client, shared with the rest of the application
    http: Arc<Http>,
    /// HTTP client for downloading media from the Discord CDN
    media_client: reqwest::Client,
    guild_id: GuildId,
}

impl SerenityGuildClient {
    /// Creates a client for one guild.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client authenticated as the bot
    /// - `guild_id` - Guild to operate on
    pub fn new(http: Arc<Http>, guild_id: u64) -> Self {
        Self {
            http,
            media_client: reqwest::Client::new(),
            guild_id: GuildId::new(guild_id),
        }
    }
}

#[async_trait]
impl GuildClient for SerenityGuildClient {
    fn guild_id(&self) -> u64 {
        self.guild_id.get()
    }

    async fn guild(&self) -> Result<GuildInfo, AppError> {
        let guild = self.guild_id.to_partial_guild(&self.http).await?;

        Ok(GuildInfo::from_serenity(&guild))
    }

    async fn roles(&self) -> Result<Vec<GuildRole>, AppError> {
        let roles = self.guild_id.roles(&self.http).await?;

        Ok(roles.values().map(GuildRole::from_serenity).collect())
    }

    async fn channels(&self) -> Result<Vec<GuildChannelInfo>, AppError> {
        let channels = self.guild_id.channels(&self.http).await?;

        Ok(channels
            .values()
            .map(GuildChannelInfo::from_serenity)
            .collect())
    }

    async fn active_threads(&self) -> Result<Vec<ThreadInfo>, AppError> {
        let data = self.guild_id.get_active_threads(&self.http).await?;

        Ok(data.threads.iter().map(ThreadInfo::from_serenity).collect())
    }

    async fn emojis(&self) -> Result<Vec<GuildEmoji>, AppError> {
        let emojis = self.guild_id.emojis(&self.http).await?;

        Ok(emojis.iter().map(GuildEmoji::from_serenity).collect())
    }

    async fn bans(&self) -> Result<Vec<GuildBan>, AppError> {
        let bans = collect_pages(
            BAN_PAGE_SIZE as usize,
            |ban: &Ban| UserPagination::After(ban.user.id),
            |after| async move {
                Ok::<_, AppError>(
                    self.guild_id
                        .bans(&self.http, after, Some(BAN_PAGE_SIZE))
                        .await?,
                )
            },
        )
        .await?;

        tracing::debug!("Fetched {} bans for guild {}", bans.len(), self.guild_id);

        Ok(bans
            .into_iter()
            .map(|ban| GuildBan {
                user_id: ban.user.id.get(),
                reason: ban.reason,
            })
            .collect())
    }

    async fn webhooks(&self) -> Result<Vec<GuildWebhook>, AppError> {
        let webhooks = self.guild_id.webhooks(&self.http).await?;

        Ok(webhooks
            .iter()
            .map(|webhook| GuildWebhook {
                webhook_id: webhook.id.get(),
            })
            .collect())
    }

    async fn members(&self) -> Result<Vec<GuildMember>, AppError> {
        // Requires the GUILD_MEMBERS privileged intent
        let members = collect_pages(
            MEMBER_PAGE_SIZE as usize,
            |member: &Member| member.user.id,
            |after| async move {
                Ok::<_, AppError>(
                    self.guild_id
                        .members(&self.http, Some(MEMBER_PAGE_SIZE), after)
                        .await?,
                )
            },
        )
        .await?;

        tracing::debug!(
            "Fetched {} members for guild {}",
            members.len(),
            self.guild_id
        );

        Ok(members.iter().map(GuildMember::from_serenity).collect())
    }

    async fn fetch_media(&self, url: &str) -> Result<MediaPayload, AppError> {
        media::download(&self.media_client, url).await
    }

    async fn create_role(&self, param: CreateRoleParam) -> Result<GuildRole, AppError> {
        let role = self
            .guild_id
            .create_role(&self.http, build_edit_role(&param, true))
            .await?;

        Ok(GuildRole::from_serenity(&role))
    }

    async fn edit_role(
        &self,
        role_id: u64,
        param: CreateRoleParam,
    ) -> Result<GuildRole, AppError> {
        // The default role cannot be renamed
        let rename = role_id != self.guild_id.get();
        let role = self
            .guild_id
            .edit_role(&self.http, RoleId::new(role_id), build_edit_role(&param, rename))
            .await?;

        Ok(GuildRole::from_serenity(&role))
    }

    async fn delete_role(&self, role_id: u64) -> Result<(), AppError> {
        self.guild_id
            .delete_role(&self.http, RoleId::new(role_id))
            .await?;
        Ok(())
    }

    async fn create_channel(
        &self,
        param: CreateChannelParam,
    ) -> Result<GuildChannelInfo, AppError> {
        let channel = self
            .guild_id
            .create_channel(&self.http, build_create_channel(&param))
            .await?;

        Ok(GuildChannelInfo::from_serenity(&channel))
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id).delete(&self.http).await?;
        Ok(())
    }

    async fn create_thread(
        &self,
        channel_id: u64,
        param: CreateThreadParam,
    ) -> Result<ThreadInfo, AppError> {
        let kind = if param.private {
            ChannelType::PrivateThread
        } else {
            ChannelType::PublicThread
        };

        let mut builder = CreateThread::new(param.name.clone())
            .kind(kind)
            .auto_archive_duration(AutoArchiveDuration::from(param.auto_archive_duration));
        if let Some(rate_limit) = param.rate_limit_per_user {
            builder = builder.rate_limit_per_user(rate_limit);
        }

        let mut thread = ChannelId::new(channel_id)
            .create_thread(&self.http, builder)
            .await?;

        // Threads are always created open; archive and lock state is applied afterward
        if param.archived || param.locked {
            thread = thread
                .id
                .edit_thread(
                    &self.http,
                    EditThread::new()
                        .archived(param.archived)
                        .locked(param.locked),
                )
                .await?;
        }

        Ok(ThreadInfo::from_serenity(&thread))
    }

    async fn create_emoji(&self, name: &str, image: &str) -> Result<GuildEmoji, AppError> {
        let emoji = self.guild_id.create_emoji(&self.http, name, image).await?;

        Ok(GuildEmoji::from_serenity(&emoji))
    }

    async fn delete_emoji(&self, emoji_id: u64) -> Result<(), AppError> {
        self.guild_id
            .delete_emoji(&self.http, EmojiId::new(emoji_id))
            .await?;
        Ok(())
    }

    async fn delete_webhook(&self, webhook_id: u64) -> Result<(), AppError> {
        self.http
            .delete_webhook(WebhookId::new(webhook_id), None)
            .await?;
        Ok(())
    }

    async fn ban(&self, user_id: u64, reason: Option<&str>) -> Result<(), AppError> {
        let user_id = UserId::new(user_id);

        match reason {
            Some(reason) => {
                self.guild_id
                    .ban_with_reason(&self.http, user_id, 0, reason)
                    .await?
            }
            None => self.guild_id.ban(&self.http, user_id, 0).await?,
        }

        Ok(())
    }

    async fn unban(&self, user_id: u64) -> Result<(), AppError> {
        self.guild_id
            .unban(&self.http, UserId::new(user_id))
            .await?;
        Ok(())
    }

    async fn edit_guild(&self, param: EditGuildParam) -> Result<(), AppError> {
        let map = edit_guild_map(param);
        if map.is_empty() {
            return Ok(());
        }

        self.http.edit_guild(self.guild_id, &map, None).await?;
        Ok(())
    }

    async fn edit_widget(&self, enabled: bool, channel_id: Option<u64>) -> Result<(), AppError> {
        let map = json!({
            "enabled": enabled,
            "channel_id": channel_id.map(|id| id.to_string()),
        });

        self.http
            .edit_guild_widget(self.guild_id, &map, None)
            .await?;
        Ok(())
    }
}

/// Requests pages until one comes back shorter than `page_size`.
///
/// `fetch` receives the cursor taken from the last item of the previous page, or
/// `None` for the first request.
pub(crate) async fn collect_pages<T, C, F, Fut>(
    page_size: usize,
    cursor: impl Fn(&T) -> C,
    mut fetch: F,
) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<C>) -> Fut,
    Fut: Future<Output = Result<Vec<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut after = None;

    loop {
        let page = fetch(after).await?;
        let page_len = page.len();

        after = page.last().map(&cursor);
        items.extend(page);

        if page_len == 0 || page_len < page_size {
            break;
        }
    }

    Ok(items)
}

fn build_edit_role(param: &CreateRoleParam, with_name: bool) -> EditRole<'static> {
    let builder = if with_name {
        EditRole::new().name(param.name.clone())
    } else {
        EditRole::new()
    };

    builder
        .colour(param.color)
        .hoist(param.hoist)
        .mentionable(param.mentionable)
        .permissions(Permissions::from_bits_truncate(param.permissions))
}

fn build_create_channel(param: &CreateChannelParam) -> CreateChannel<'static> {
    let overwrites: Vec<PermissionOverwrite> = param
        .overwrites
        .iter()
        .map(|overwrite| PermissionOverwrite {
            allow: Permissions::from_bits_truncate(overwrite.allow),
            deny: Permissions::from_bits_truncate(overwrite.deny),
            kind: match overwrite.target {
                OverwriteTarget::Role(id) => PermissionOverwriteType::Role(RoleId::new(id)),
                OverwriteTarget::Member(id) => PermissionOverwriteType::Member(UserId::new(id)),
            },
        })
        .collect();

    let mut builder = CreateChannel::new(param.name.clone())
        .kind(channel_type(param.kind))
        .nsfw(param.nsfw)
        .permissions(overwrites);

    if let Some(parent_id) = param.parent_id {
        builder = builder.category(ChannelId::new(parent_id));
    }
    if let Some(topic) = &param.topic {
        builder = builder.topic(topic.clone());
    }
    if let Some(rate_limit) = param.rate_limit_per_user {
        builder = builder.rate_limit_per_user(rate_limit);
    }
    if let Some(bitrate) = param.bitrate {
        builder = builder.bitrate(bitrate);
    }
    if let Some(user_limit) = param.user_limit {
        builder = builder.user_limit(user_limit);
    }

    builder
}

/// Builds the JSON body of a modify guild request, omitting untouched fields and
/// writing `null` for cleared ones.
pub(crate) fn edit_guild_map(param: EditGuildParam) -> Map<String, Value> {
    fn id_value(id: Option<u64>) -> Value {
        id.map_or(Value::Null, |id| Value::String(id.to_string()))
    }

    let mut map = Map::new();

    if let Some(name) = param.name {
        map.insert("name".to_string(), json!(name));
    }
    if let Some(level) = param.verification_level {
        map.insert("verification_level".to_string(), json!(level));
    }
    if let Some(filter) = param.explicit_content_filter {
        map.insert("explicit_content_filter".to_string(), json!(filter));
    }
    if let Some(level) = param.default_message_notifications {
        map.insert("default_message_notifications".to_string(), json!(level));
    }
    if let Some(afk_channel_id) = param.afk_channel_id {
        map.insert("afk_channel_id".to_string(), id_value(afk_channel_id));
    }
    if let Some(afk_timeout) = param.afk_timeout {
        map.insert("afk_timeout".to_string(), json!(afk_timeout));
    }
    if let Some(icon) = param.icon {
        map.insert("icon".to_string(), json!(icon));
    }
    if let Some(splash) = param.splash {
        map.insert("splash".to_string(), json!(splash));
    }
    if let Some(banner) = param.banner {
        map.insert("banner".to_string(), json!(banner));
    }
    if let Some(system_channel_id) = param.system_channel_id {
        map.insert("system_channel_id".to_string(), id_value(system_channel_id));
    }
    if let Some(flags) = param.system_channel_flags {
        map.insert("system_channel_flags".to_string(), json!(flags));
    }

    map
}

fn channel_kind(kind: ChannelType) -> GuildChannelKind {
    match kind {
        ChannelType::Category => GuildChannelKind::Category,
        ChannelType::Text => GuildChannelKind::Text,
        ChannelType::News => GuildChannelKind::News,
        ChannelType::Voice => GuildChannelKind::Voice,
        ChannelType::Stage => GuildChannelKind::Stage,
        _ => GuildChannelKind::Other,
    }
}

fn channel_type(kind: GuildChannelKind) -> ChannelType {
    match kind {
        GuildChannelKind::Category => ChannelType::Category,
        GuildChannelKind::News => ChannelType::News,
        GuildChannelKind::Voice => ChannelType::Voice,
        GuildChannelKind::Stage => ChannelType::Stage,
        GuildChannelKind::Text | GuildChannelKind::Other => ChannelType::Text,
    }
}

impl GuildInfo {
    pub fn from_serenity(guild: &PartialGuild) -> Self {
        Self {
            guild_id: guild.id.get(),
            name: guild.name.clone(),
            verification_level: u8::from(guild.verification_level),
            explicit_content_filter: u8::from(guild.explicit_content_filter),
            default_message_notifications: u8::from(guild.default_message_notifications),
            afk_channel_id: guild
                .afk_metadata
                .as_ref()
                .map(|afk| afk.afk_channel_id.get()),
            afk_timeout: guild
                .afk_metadata
                .as_ref()
                .map(|afk| u16::from(afk.afk_timeout))
                .unwrap_or(DEFAULT_AFK_TIMEOUT),
            widget_enabled: guild.widget_enabled.unwrap_or(false),
            widget_channel_id: guild.widget_channel_id.map(|id| id.get()),
            system_channel_id: guild.system_channel_id.map(|id| id.get()),
            icon_url: guild.icon_url(),
            splash_url: guild.splash_url(),
            banner_url: guild.banner_url(),
            premium_tier: u8::from(guild.premium_tier),
            features: guild.features.clone(),
        }
    }
}

impl GuildRole {
    pub fn from_serenity(role: &Role) -> Self {
        Self {
            role_id: role.id.get(),
            name: role.name.clone(),
            color: role.colour.0,
            hoist: role.hoist,
            permissions: role.permissions.bits(),
            mentionable: role.mentionable,
            position: role.position,
            managed: role.managed,
        }
    }
}

impl GuildChannelInfo {
    pub fn from_serenity(channel: &GuildChannel) -> Self {
        let overwrites = channel
            .permission_overwrites
            .iter()
            .filter_map(|overwrite| {
                let target = match overwrite.kind {
                    PermissionOverwriteType::Role(id) => OverwriteTarget::Role(id.get()),
                    PermissionOverwriteType::Member(id) => OverwriteTarget::Member(id.get()),
                    _ => return None,
                };

                Some(GuildOverwrite {
                    target,
                    allow: overwrite.allow.bits(),
                    deny: overwrite.deny.bits(),
                })
            })
            .collect();

        Self {
            channel_id: channel.id.get(),
            kind: channel_kind(channel.kind),
            name: channel.name.clone(),
            parent_id: channel.parent_id.map(|id| id.get()),
            position: channel.position,
            overwrites,
            topic: channel.topic.clone(),
            nsfw: channel.nsfw,
            rate_limit_per_user: channel.rate_limit_per_user.map(u16::from),
            bitrate: channel.bitrate,
            user_limit: channel.user_limit,
        }
    }
}

impl ThreadInfo {
    pub fn from_serenity(thread: &GuildChannel) -> Self {
        let metadata = thread.thread_metadata.as_ref();

        Self {
            thread_id: thread.id.get(),
            parent_id: thread.parent_id.map(|id| id.get()),
            name: thread.name.clone(),
            archived: metadata.is_some_and(|m| m.archived),
            auto_archive_duration: metadata
                .map(|m| u16::from(m.auto_archive_duration))
                .unwrap_or(1440),
            locked: metadata.is_some_and(|m| m.locked),
            rate_limit_per_user: thread.rate_limit_per_user.map(u16::from),
            private: thread.kind == ChannelType::PrivateThread,
        }
    }
}

impl GuildEmoji {
    pub fn from_serenity(emoji: &Emoji) -> Self {
        Self {
            emoji_id: emoji.id.get(),
            name: emoji.name.clone(),
            url: emoji.url(),
        }
    }
}

impl GuildMember {
    pub fn from_serenity(member: &Member) -> Self {
        Self {
            user_id: member.user.id.get(),
            username: member.user.name.clone(),
            discriminator: member.user.discriminator.map(|d| d.get()),
            avatar_url: member.user.avatar_url(),
            joined_at: member
                .joined_at
                .map(|joined_at| joined_at.unix_timestamp() * 1000),
            role_ids: member.roles.iter().map(|id| id.get()).collect(),
            bot: member.user.bot,
        }
    }
}
