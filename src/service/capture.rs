//! Guild capture pipeline.
//!
//! Reads a live guild through a `GuildClient` and assembles a `Snapshot`. Scalar
//! settings and media are read first, then bans, roles, emojis, members and the
//! channel tree are captured concurrently. Any failing remote call aborts the whole
//! capture and nothing is persisted.

use std::collections::HashMap;

use crate::{
    data::BackupRepository,
    discord::{media, GuildClient},
    error::AppError,
    model::{
        ban::BanData,
        channel::{
            CategoryData, ChannelData, ChannelsData, PermissionOverwriteData, TextChannelData,
            ThreadData, VoiceChannelData,
        },
        emoji::EmojiData,
        guild::{
            GuildChannelInfo, GuildChannelKind, GuildInfo, GuildRole, OverwriteTarget, ThreadInfo,
        },
        member::MemberData,
        role::RoleData,
        snapshot::{AfkData, WidgetData},
        BackupCategory, CaptureOptions, MediaMode, Snapshot,
    },
};

/// Role id to role name lookup used to express overwrites and member roles by name.
type RoleNames = HashMap<u64, String>;

pub struct CaptureService<'a> {
    client: &'a dyn GuildClient,
    repo: &'a BackupRepository,
}

impl<'a> CaptureService<'a> {
    pub fn new(client: &'a dyn GuildClient, repo: &'a BackupRepository) -> Self {
        Self { client, repo }
    }

    /// Captures the client's guild into a snapshot.
    ///
    /// # Arguments
    /// - `options` - Id, exclusions, media mode and persistence settings
    ///
    /// # Returns
    /// - `Ok(Snapshot)` - The assembled snapshot, returned whether or not it was saved
    /// - `Err(AppError)` - A remote call, media download or the final write failed
    pub async fn capture(&self, options: &CaptureOptions) -> Result<Snapshot, AppError> {
        let id = match &options.backup_id {
            Some(id) => id.clone(),
            None => {
                let existing = self.repo.list(&options.owner_scope).await?;
                format!("{}{}", existing.len() + 1, options.owner_scope)
            }
        };

        tracing::info!("Capturing guild {} as backup {}", self.client.guild_id(), id);

        let guild = self.client.guild().await?;

        let (icon, splash, banner) = tokio::try_join!(
            self.capture_media(guild.icon_url.as_deref(), options.media_mode),
            self.capture_media(guild.splash_url.as_deref(), options.media_mode),
            self.capture_media(guild.banner_url.as_deref(), options.media_mode),
        )?;

        // Role names are needed for overwrites and members even when roles are excluded
        let live_roles = self.client.roles().await?;
        let role_names: RoleNames = live_roles
            .iter()
            .map(|role| (role.role_id, role.name.clone()))
            .collect();

        let (bans, roles, emojis, (channels, live_channels), members) = tokio::try_join!(
            self.capture_bans(options),
            async { Ok::<_, AppError>(capture_roles(&guild, &live_roles, options)) },
            self.capture_emojis(options),
            self.capture_channels(&role_names, options),
            self.capture_members(&guild, &role_names, options),
        )?;
        let channel_names = channels_by_id(&live_channels);

        let snapshot = Snapshot {
            id,
            guild_id: guild.guild_id.to_string(),
            created_timestamp: chrono::Utc::now().timestamp_millis(),
            name: guild.name.clone(),
            verification_level: guild.verification_level,
            explicit_content_filter: guild.explicit_content_filter,
            default_message_notifications: guild.default_message_notifications,
            afk: afk_data(&guild, &channel_names),
            widget: WidgetData {
                enabled: guild.widget_enabled,
                channel: guild
                    .widget_channel_id
                    .and_then(|id| channel_names.get(&id).cloned()),
            },
            icon_url: icon.0,
            icon_base64: icon.1,
            splash_url: splash.0,
            splash_base64: splash.1,
            banner_url: banner.0,
            banner_base64: banner.1,
            roles,
            bans,
            emojis,
            members,
            channels,
        };

        tracing::info!(
            "Captured backup {}: {} roles, {} categories, {} channels, {} emojis, {} bans",
            snapshot.id,
            snapshot.roles.len(),
            snapshot.channels.categories.len(),
            snapshot.channels.others.len(),
            snapshot.emojis.len(),
            snapshot.bans.len()
        );

        if options.json_save {
            self.repo.put(&snapshot, options.json_beautify).await?;
            tracing::info!("Saved backup {}", snapshot.id);
        }

        Ok(snapshot)
    }

    /// Returns `(url, embedded data URI)` for an optional guild image.
    async fn capture_media(
        &self,
        url: Option<&str>,
        mode: MediaMode,
    ) -> Result<(Option<String>, Option<String>), AppError> {
        let Some(url) = url else {
            return Ok((None, None));
        };

        let embedded = match mode {
            MediaMode::Url => None,
            MediaMode::Embed => {
                let payload = self.client.fetch_media(url).await?;
                Some(media::to_data_uri(&payload))
            }
        };

        Ok((Some(url.to_string()), embedded))
    }

    async fn capture_bans(&self, options: &CaptureOptions) -> Result<Vec<BanData>, AppError> {
        if options.excludes(BackupCategory::Bans) {
            return Ok(Vec::new());
        }

        let bans = self.client.bans().await?;

        Ok(bans
            .into_iter()
            .map(|ban| BanData {
                id: ban.user_id.to_string(),
                reason: ban.reason,
            })
            .collect())
    }

    async fn capture_emojis(&self, options: &CaptureOptions) -> Result<Vec<EmojiData>, AppError> {
        if options.excludes(BackupCategory::Emojis) {
            return Ok(Vec::new());
        }

        let mut emojis = Vec::new();
        for emoji in self.client.emojis().await? {
            let base64 = match options.media_mode {
                MediaMode::Url => None,
                MediaMode::Embed => Some(media::to_data_uri(
                    &self.client.fetch_media(&emoji.url).await?,
                )),
            };

            emojis.push(EmojiData {
                name: emoji.name,
                url: emoji.url,
                base64,
            });
        }

        Ok(emojis)
    }

    /// Captures the channel tree.
    ///
    /// Returns the tree along with the raw channel list so AFK and widget references
    /// can be resolved to names even when channels are excluded from the backup.
    async fn capture_channels(
        &self,
        role_names: &RoleNames,
        options: &CaptureOptions,
    ) -> Result<(ChannelsData, Vec<GuildChannelInfo>), AppError> {
        let mut live_channels = self.client.channels().await?;
        live_channels.sort_by_key(|channel| (channel.position, channel.channel_id));

        if options.excludes(BackupCategory::Channels) {
            return Ok((ChannelsData::default(), live_channels));
        }

        let threads = self.client.active_threads().await?;

        let mut categories = Vec::new();
        for category in live_channels
            .iter()
            .filter(|channel| channel.kind == GuildChannelKind::Category)
        {
            let children = live_channels
                .iter()
                .filter(|channel| channel.parent_id == Some(category.channel_id))
                .filter_map(|channel| {
                    capture_channel(channel, Some(&category.name), &threads, role_names)
                })
                .collect();

            categories.push(CategoryData {
                name: category.name.clone(),
                permissions: capture_overwrites(category, role_names),
                children,
            });
        }

        let others = live_channels
            .iter()
            .filter(|channel| channel.parent_id.is_none())
            .filter_map(|channel| capture_channel(channel, None, &threads, role_names))
            .collect();

        Ok((ChannelsData { categories, others }, live_channels))
    }

    async fn capture_members(
        &self,
        guild: &GuildInfo,
        role_names: &RoleNames,
        options: &CaptureOptions,
    ) -> Result<Vec<MemberData>, AppError> {
        if !options.save_members {
            return Ok(Vec::new());
        }

        let members = self.client.members().await?;

        Ok(members
            .into_iter()
            .map(|member| MemberData {
                user_id: member.user_id.to_string(),
                username: member.username,
                discriminator: member.discriminator,
                avatar_url: member.avatar_url,
                joined_timestamp: member.joined_at,
                roles: member
                    .role_ids
                    .iter()
                    .filter(|id| **id != guild.guild_id)
                    .filter_map(|id| role_names.get(id).cloned())
                    .collect(),
                bot: member.bot,
            })
            .collect())
    }
}

/// Captures roles from highest to lowest position, skipping integration-managed roles
/// which cannot be recreated.
fn capture_roles(
    guild: &GuildInfo,
    live_roles: &[GuildRole],
    options: &CaptureOptions,
) -> Vec<RoleData> {
    if options.excludes(BackupCategory::Roles) {
        return Vec::new();
    }

    let mut roles: Vec<&GuildRole> = live_roles.iter().filter(|role| !role.managed).collect();
    roles.sort_by(|a, b| b.position.cmp(&a.position).then(a.role_id.cmp(&b.role_id)));

    roles
        .into_iter()
        .map(|role| RoleData {
            name: role.name.clone(),
            color: role.color,
            hoist: role.hoist,
            permissions: role.permissions,
            mentionable: role.mentionable,
            position: role.position,
            is_everyone: role.role_id == guild.guild_id,
        })
        .collect()
}

/// Captures a non-category channel, or `None` for unsupported channel types.
fn capture_channel(
    channel: &GuildChannelInfo,
    parent: Option<&str>,
    threads: &[ThreadInfo],
    role_names: &RoleNames,
) -> Option<ChannelData> {
    let parent = parent.map(str::to_string);
    let permissions = capture_overwrites(channel, role_names);

    if channel.kind.is_text_like() {
        let threads = threads
            .iter()
            .filter(|thread| thread.parent_id == Some(channel.channel_id))
            .map(|thread| ThreadData {
                name: thread.name.clone(),
                archived: thread.archived,
                auto_archive_duration: thread.auto_archive_duration,
                locked: thread.locked,
                rate_limit_per_user: thread.rate_limit_per_user,
                private: thread.private,
            })
            .collect();

        Some(ChannelData::Text(TextChannelData {
            name: channel.name.clone(),
            parent,
            permissions,
            nsfw: channel.nsfw,
            rate_limit_per_user: channel.rate_limit_per_user,
            topic: channel.topic.clone(),
            is_news: channel.kind == GuildChannelKind::News,
            threads,
        }))
    } else if channel.kind.is_voice_like() {
        Some(ChannelData::Voice(VoiceChannelData {
            name: channel.name.clone(),
            parent,
            permissions,
            bitrate: channel.bitrate.unwrap_or(64_000),
            user_limit: channel.user_limit.unwrap_or(0),
        }))
    } else {
        None
    }
}

/// Converts role overwrites to name-keyed records. Member overwrites and overwrites
/// for roles that no longer exist are dropped.
fn capture_overwrites(
    channel: &GuildChannelInfo,
    role_names: &RoleNames,
) -> Vec<PermissionOverwriteData> {
    channel
        .overwrites
        .iter()
        .filter_map(|overwrite| match overwrite.target {
            OverwriteTarget::Role(role_id) => {
                role_names
                    .get(&role_id)
                    .map(|role_name| PermissionOverwriteData {
                        role_name: role_name.clone(),
                        allow: overwrite.allow,
                        deny: overwrite.deny,
                    })
            }
            OverwriteTarget::Member(_) => None,
        })
        .collect()
}

fn channels_by_id(channels: &[GuildChannelInfo]) -> HashMap<u64, String> {
    channels
        .iter()
        .map(|channel| (channel.channel_id, channel.name.clone()))
        .collect()
}

fn afk_data(guild: &GuildInfo, channel_names: &HashMap<u64, String>) -> Option<AfkData> {
    let channel_id = guild.afk_channel_id?;

    channel_names.get(&channel_id).map(|name| AfkData {
        name: name.clone(),
        timeout: guild.afk_timeout,
    })
}
