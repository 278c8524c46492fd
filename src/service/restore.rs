//! Backup restore pipeline.
//!
//! Replays a `Snapshot` onto a target guild. Guild settings, the role and channel
//! structure, emojis and bans are restored concurrently. Within the structure
//! task the order is fixed because channels reference roles and categories by name:
//! roles first, then categories, then the remaining channels, then threads, and
//! finally the AFK and widget pointers that reference channels.
//!
//! Role lookups are seeded with the roles already present on the target, so
//! overwrites may name the default role or roles the restore did not create. Name
//! lookups resolve to the first role or channel seen with that name. Nothing is
//! rolled back when a step fails.

use std::{cmp::Reverse, collections::HashMap};

use crate::{
    discord::{media, GuildClient},
    error::AppError,
    model::{
        channel::{
            ChannelData, PermissionOverwriteData, TextChannelData, ThreadData, VoiceChannelData,
        },
        guild::{
            CreateChannelParam, CreateRoleParam, CreateThreadParam, EditGuildParam,
            GuildChannelInfo, GuildChannelKind, GuildInfo, GuildOverwrite, OverwriteTarget,
            FEATURE_COMMUNITY, FEATURE_NEWS,
        },
        snapshot::Snapshot,
    },
    util::parse::parse_u64_from_string,
};

/// Name to id lookup; the first entry inserted for a name wins.
#[derive(Debug, Default)]
struct NameTable(HashMap<String, u64>);

impl NameTable {
    fn insert(&mut self, name: &str, id: u64) {
        self.0.entry(name.to_string()).or_insert(id);
    }

    fn get(&self, name: &str) -> Option<u64> {
        self.0.get(name).copied()
    }
}

/// Name of the default role in backups, whatever the target calls it.
const DEFAULT_ROLE_NAME: &str = "@everyone";

/// A created text channel whose threads are restored once every channel exists.
struct ThreadParent<'s> {
    channel_id: u64,
    kind: GuildChannelKind,
    threads: &'s [ThreadData],
}

/// Lowers a voice bitrate to the ceiling allowed by the target guild's boost tier.
pub fn clamp_bitrate(bitrate: u32, guild: &GuildInfo) -> u32 {
    bitrate.min(guild.max_bitrate())
}

pub struct RestoreService<'a> {
    client: &'a dyn GuildClient,
}

impl<'a> RestoreService<'a> {
    pub fn new(client: &'a dyn GuildClient) -> Self {
        Self { client }
    }

    /// Restores `snapshot` onto the client's guild.
    ///
    /// The target is expected to be empty, typically after running the clear step.
    ///
    /// # Returns
    /// - `Ok(())` - Every part of the snapshot was replayed
    /// - `Err(AppError)` - The first failing remote call; earlier changes remain applied
    pub async fn restore(&self, snapshot: &Snapshot) -> Result<(), AppError> {
        tracing::info!(
            "Restoring backup {} onto guild {}",
            snapshot.id,
            self.client.guild_id()
        );

        let guild = self.client.guild().await?;

        tokio::try_join!(
            self.restore_settings(snapshot, &guild),
            self.restore_structure(snapshot, &guild),
            self.restore_emojis(snapshot),
            self.restore_bans(snapshot),
        )?;

        tracing::info!("Restored backup {}", snapshot.id);

        Ok(())
    }

    /// Name, moderation levels, notification default and images.
    async fn restore_settings(
        &self,
        snapshot: &Snapshot,
        guild: &GuildInfo,
    ) -> Result<(), AppError> {
        // Community guilds reject disabling verification and the content filter
        let community = guild.has_feature(FEATURE_COMMUNITY);
        let keep = |value: u8| (!community || value != 0).then_some(value);

        let (icon, splash, banner) = tokio::try_join!(
            self.resolve_image(snapshot.icon_base64.as_deref(), snapshot.icon_url.as_deref()),
            self.resolve_image(
                snapshot.splash_base64.as_deref(),
                snapshot.splash_url.as_deref()
            ),
            self.resolve_image(
                snapshot.banner_base64.as_deref(),
                snapshot.banner_url.as_deref()
            ),
        )?;

        let param = EditGuildParam {
            name: Some(snapshot.name.clone()),
            verification_level: keep(snapshot.verification_level),
            explicit_content_filter: keep(snapshot.explicit_content_filter),
            default_message_notifications: Some(snapshot.default_message_notifications),
            icon: icon.map(Some),
            splash: splash.map(Some),
            banner: banner.map(Some),
            ..Default::default()
        };

        self.client.edit_guild(param).await
    }

    /// Roles, then channels, then the settings that point at channels.
    async fn restore_structure(
        &self,
        snapshot: &Snapshot,
        guild: &GuildInfo,
    ) -> Result<(), AppError> {
        let roles = self.restore_roles(snapshot).await?;
        let (channels, thread_parents) = self.restore_channels(snapshot, guild, &roles).await?;
        self.restore_threads(&thread_parents).await?;

        self.restore_afk(snapshot, &channels).await?;
        self.restore_widget(snapshot, &channels).await
    }

    /// Creates the backup's roles and edits the default role in place.
    ///
    /// # Returns
    /// - `Ok(NameTable)` - Role name to id lookup of the target's existing roles,
    ///   highest first, followed by the created ones
    async fn restore_roles(&self, snapshot: &Snapshot) -> Result<NameTable, AppError> {
        let mut roles = NameTable::default();
        let default_role_id = self.client.guild_id();

        let mut existing = self.client.roles().await?;
        existing.sort_by_key(|role| (Reverse(role.position), role.role_id));
        for role in &existing {
            if role.role_id == default_role_id {
                roles.insert(DEFAULT_ROLE_NAME, role.role_id);
            } else {
                roles.insert(&role.name, role.role_id);
            }
        }

        for role in &snapshot.roles {
            let param = CreateRoleParam {
                name: role.name.clone(),
                color: role.color,
                hoist: role.hoist,
                permissions: role.permissions,
                mentionable: role.mentionable,
            };

            if role.is_everyone {
                // The default role always exists; only its permissions carry over
                self.client.edit_role(default_role_id, param).await?;
                roles.insert(&role.name, default_role_id);
            } else {
                let created = self.client.create_role(param).await?;
                roles.insert(&role.name, created.role_id);
            }
        }

        tracing::debug!("Restored {} roles", snapshot.roles.len());

        Ok(roles)
    }

    /// Creates categories, then every other channel in capture order.
    ///
    /// # Returns
    /// - `Ok((NameTable, Vec<ThreadParent>))` - Channel name to id lookup of every created
    ///   channel, and the created text channels that still need their threads
    async fn restore_channels<'s>(
        &self,
        snapshot: &'s Snapshot,
        guild: &GuildInfo,
        roles: &NameTable,
    ) -> Result<(NameTable, Vec<ThreadParent<'s>>), AppError> {
        let mut categories = NameTable::default();
        let mut channels = NameTable::default();
        let mut thread_parents = Vec::new();

        for category in &snapshot.channels.categories {
            let mut param = CreateChannelParam::new(&category.name, GuildChannelKind::Category);
            param.overwrites = resolve_overwrites(&category.permissions, roles);

            let created = self.client.create_channel(param).await?;
            categories.insert(&category.name, created.channel_id);
        }

        let children = snapshot
            .channels
            .categories
            .iter()
            .flat_map(|category| category.children.iter());

        for channel in children.chain(snapshot.channels.others.iter()) {
            let parent_id = match channel.parent() {
                Some(parent) => {
                    let id = categories.get(parent);
                    if id.is_none() {
                        tracing::warn!(
                            "Category '{}' of channel '{}' not found, creating at top level",
                            parent,
                            channel.name()
                        );
                    }
                    id
                }
                None => None,
            };

            let created_id = match channel {
                ChannelData::Text(text) => {
                    let created = self
                        .restore_text_channel(text, parent_id, guild, roles)
                        .await?;
                    if !text.threads.is_empty() {
                        thread_parents.push(ThreadParent {
                            channel_id: created.channel_id,
                            kind: created.kind,
                            threads: &text.threads,
                        });
                    }
                    created.channel_id
                }
                ChannelData::Voice(voice) => {
                    self.restore_voice_channel(voice, parent_id, guild, roles)
                        .await?
                }
            };
            channels.insert(channel.name(), created_id);
        }

        Ok((channels, thread_parents))
    }

    async fn restore_text_channel(
        &self,
        text: &TextChannelData,
        parent_id: Option<u64>,
        guild: &GuildInfo,
        roles: &NameTable,
    ) -> Result<GuildChannelInfo, AppError> {
        let supports_news =
            guild.has_feature(FEATURE_NEWS) || guild.has_feature(FEATURE_COMMUNITY);
        let kind = if text.is_news && supports_news {
            GuildChannelKind::News
        } else {
            GuildChannelKind::Text
        };

        let mut param = CreateChannelParam::new(&text.name, kind);
        param.parent_id = parent_id;
        param.overwrites = resolve_overwrites(&text.permissions, roles);
        param.topic = text.topic.clone();
        param.nsfw = text.nsfw;
        param.rate_limit_per_user = text.rate_limit_per_user;

        self.client.create_channel(param).await
    }

    async fn restore_voice_channel(
        &self,
        voice: &VoiceChannelData,
        parent_id: Option<u64>,
        guild: &GuildInfo,
        roles: &NameTable,
    ) -> Result<u64, AppError> {
        let mut param = CreateChannelParam::new(&voice.name, GuildChannelKind::Voice);
        param.parent_id = parent_id;
        param.overwrites = resolve_overwrites(&voice.permissions, roles);
        param.bitrate = Some(clamp_bitrate(voice.bitrate, guild));
        param.user_limit = Some(voice.user_limit);

        let created = self.client.create_channel(param).await?;

        Ok(created.channel_id)
    }

    async fn restore_threads(&self, parents: &[ThreadParent<'_>]) -> Result<(), AppError> {
        for parent in parents {
            for thread in parent.threads {
                // Announcement channels only host public threads
                let private = thread.private && parent.kind != GuildChannelKind::News;
                if thread.private && !private {
                    tracing::warn!(
                        "Private thread '{}' restored as public in announcement channel",
                        thread.name
                    );
                }

                self.client
                    .create_thread(
                        parent.channel_id,
                        CreateThreadParam {
                            name: thread.name.clone(),
                            auto_archive_duration: thread.auto_archive_duration,
                            rate_limit_per_user: thread.rate_limit_per_user,
                            private,
                            archived: thread.archived,
                            locked: thread.locked,
                        },
                    )
                    .await?;
            }
        }

        Ok(())
    }

    async fn restore_afk(
        &self,
        snapshot: &Snapshot,
        channels: &NameTable,
    ) -> Result<(), AppError> {
        let Some(afk) = &snapshot.afk else {
            return Ok(());
        };

        let Some(channel_id) = channels.get(&afk.name) else {
            tracing::warn!("AFK channel '{}' not found, skipping", afk.name);
            return Ok(());
        };

        self.client
            .edit_guild(EditGuildParam {
                afk_channel_id: Some(Some(channel_id)),
                afk_timeout: Some(afk.timeout),
                ..Default::default()
            })
            .await
    }

    async fn restore_widget(
        &self,
        snapshot: &Snapshot,
        channels: &NameTable,
    ) -> Result<(), AppError> {
        let widget = &snapshot.widget;
        if !widget.enabled && widget.channel.is_none() {
            return Ok(());
        }

        let channel_id = widget
            .channel
            .as_deref()
            .and_then(|name| channels.get(name));

        self.client.edit_widget(widget.enabled, channel_id).await
    }

    async fn restore_emojis(&self, snapshot: &Snapshot) -> Result<(), AppError> {
        for emoji in &snapshot.emojis {
            let image = self
                .resolve_image(emoji.base64.as_deref(), Some(&emoji.url))
                .await?;

            if let Some(image) = image {
                self.client.create_emoji(&emoji.name, &image).await?;
            }
        }

        tracing::debug!("Restored {} emojis", snapshot.emojis.len());

        Ok(())
    }

    async fn restore_bans(&self, snapshot: &Snapshot) -> Result<(), AppError> {
        for ban in &snapshot.bans {
            let user_id = parse_u64_from_string(&ban.id)?;
            self.client.ban(user_id, ban.reason.as_deref()).await?;
        }

        tracing::debug!("Restored {} bans", snapshot.bans.len());

        Ok(())
    }

    /// Returns an image as a `data:` URI, preferring the embedded copy and downloading
    /// the URL otherwise.
    async fn resolve_image(
        &self,
        embedded: Option<&str>,
        url: Option<&str>,
    ) -> Result<Option<String>, AppError> {
        if let Some(embedded) = embedded {
            match media::from_data_uri(embedded) {
                Ok(_) => return Ok(Some(embedded.to_string())),
                Err(e) => tracing::warn!("Embedded image unusable, downloading instead: {}", e),
            }
        }

        match url {
            Some(url) => {
                let payload = self.client.fetch_media(url).await?;
                Ok(Some(media::to_data_uri(&payload)))
            }
            None => Ok(None),
        }
    }
}

/// Maps name-keyed overwrites onto the target's role ids, skipping unknown roles.
fn resolve_overwrites(
    overwrites: &[PermissionOverwriteData],
    roles: &NameTable,
) -> Vec<GuildOverwrite> {
    overwrites
        .iter()
        .filter_map(|overwrite| match roles.get(&overwrite.role_name) {
            Some(role_id) => Some(GuildOverwrite {
                target: OverwriteTarget::Role(role_id),
                allow: overwrite.allow,
                deny: overwrite.deny,
            }),
            None => {
                tracing::warn!(
                    "Role '{}' not found, skipping permission overwrite",
                    overwrite.role_name
                );
                None
            }
        })
        .collect()
}
