//! In-memory `GuildClient` used by the pipeline tests.
//!
//! Mutations change the stored state the way Discord would, so a guild captured from
//! one fake can be restored into another and captured again. Every call is recorded in
//! order as `"<method> <detail>"`.

use std::{
    collections::HashSet,
    fmt::Display,
    sync::{Mutex, MutexGuard},
};

use serenity::async_trait;

use crate::{
    discord::GuildClient,
    error::AppError,
    model::guild::{
        CreateChannelParam, CreateRoleParam, CreateThreadParam, EditGuildParam, GuildBan,
        GuildChannelInfo, GuildChannelKind, GuildEmoji, GuildInfo, GuildMember, GuildOverwrite,
        GuildRole, GuildWebhook, MediaPayload, ThreadInfo,
    },
};

#[derive(Debug, Default)]
pub struct FakeState {
    pub guild: GuildInfo,
    pub roles: Vec<GuildRole>,
    pub channels: Vec<GuildChannelInfo>,
    pub threads: Vec<ThreadInfo>,
    pub emojis: Vec<GuildEmoji>,
    pub bans: Vec<GuildBan>,
    pub webhooks: Vec<GuildWebhook>,
    pub members: Vec<GuildMember>,
    pub system_channel_flags: u64,
    /// Every call in the order it was made.
    pub calls: Vec<String>,
    /// Methods that fail with a remote error.
    failing: HashSet<String>,
    next_id: u64,
}

pub struct FakeGuild {
    guild_id: u64,
    state: Mutex<FakeState>,
}

impl FakeGuild {
    /// Creates an empty boost tier 0 guild holding only the default role.
    pub fn new(guild_id: u64) -> Self {
        let state = FakeState {
            guild: GuildInfo {
                guild_id,
                name: "Fake Guild".to_string(),
                afk_timeout: 300,
                ..Default::default()
            },
            roles: vec![GuildRole {
                role_id: guild_id,
                name: "@everyone".to_string(),
                color: 0,
                hoist: false,
                permissions: 104_324_673,
                mentionable: false,
                position: 0,
                managed: false,
            }],
            ..Default::default()
        };

        Self {
            guild_id,
            state: Mutex::new(state),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Makes every later call to `method` fail.
    pub fn fail_on(&self, method: &str) {
        self.state().failing.insert(method.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Number of recorded calls to `method`.
    pub fn count(&self, method: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| call.split(' ').next() == Some(method))
            .count()
    }

    pub fn set_premium_tier(&self, tier: u8) {
        self.state().guild.premium_tier = tier;
    }

    pub fn add_feature(&self, feature: &str) {
        self.state().guild.features.push(feature.to_string());
    }

    pub fn add_role(&self, name: &str, permissions: u64, managed: bool) -> u64 {
        let mut state = self.state();
        let role_id = state.next_id();
        let position = state.roles.len() as u16;

        state.roles.push(GuildRole {
            role_id,
            name: name.to_string(),
            color: 0x3498db,
            hoist: false,
            permissions,
            mentionable: false,
            position,
            managed,
        });

        role_id
    }

    pub fn add_channel(
        &self,
        name: &str,
        kind: GuildChannelKind,
        parent_id: Option<u64>,
        overwrites: Vec<GuildOverwrite>,
    ) -> u64 {
        let mut param = CreateChannelParam::new(name, kind);
        param.parent_id = parent_id;
        param.overwrites = overwrites;
        if kind.is_voice_like() {
            param.bitrate = Some(64_000);
            param.user_limit = Some(0);
        }

        self.state().insert_channel(param)
    }

    pub fn add_thread(&self, parent_id: u64, name: &str) -> u64 {
        let mut state = self.state();
        let thread_id = state.next_id();

        state.threads.push(ThreadInfo {
            thread_id,
            parent_id: Some(parent_id),
            name: name.to_string(),
            archived: false,
            auto_archive_duration: 1440,
            locked: false,
            rate_limit_per_user: None,
            private: false,
        });

        thread_id
    }

    pub fn add_emoji(&self, name: &str) -> u64 {
        self.state().insert_emoji(name)
    }

    pub fn add_ban(&self, user_id: u64, reason: Option<&str>) {
        self.state().bans.push(GuildBan {
            user_id,
            reason: reason.map(str::to_string),
        });
    }

    pub fn add_webhook(&self) -> u64 {
        let mut state = self.state();
        let webhook_id = state.next_id();
        state.webhooks.push(GuildWebhook { webhook_id });

        webhook_id
    }

    pub fn add_member(&self, user_id: u64, username: &str, role_ids: Vec<u64>) {
        self.state().members.push(GuildMember {
            user_id,
            username: username.to_string(),
            discriminator: None,
            avatar_url: None,
            joined_at: Some(1_700_000_000_000),
            role_ids,
            bot: false,
        });
    }

    pub fn channel(&self, name: &str) -> Option<GuildChannelInfo> {
        self.state()
            .channels
            .iter()
            .find(|channel| channel.name == name)
            .cloned()
    }

    pub fn role(&self, name: &str) -> Option<GuildRole> {
        self.state()
            .roles
            .iter()
            .find(|role| role.name == name)
            .cloned()
    }

    /// Records a call and returns the locked state, or the injected failure.
    fn call(
        &self,
        method: &str,
        detail: impl Display,
    ) -> Result<MutexGuard<'_, FakeState>, AppError> {
        let mut state = self.state();
        state.calls.push(format!("{} {}", method, detail));

        if state.failing.contains(method) {
            return Err(AppError::RemoteCall(format!("{} rejected", method)));
        }

        Ok(state)
    }
}

impl FakeState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.guild.guild_id + self.next_id
    }

    fn insert_channel(&mut self, param: CreateChannelParam) -> u64 {
        let channel_id = self.next_id();
        let position = self.channels.len() as u16;

        self.channels.push(GuildChannelInfo {
            channel_id,
            kind: param.kind,
            name: param.name,
            parent_id: param.parent_id,
            position,
            overwrites: param.overwrites,
            topic: param.topic,
            nsfw: param.nsfw,
            rate_limit_per_user: param.rate_limit_per_user,
            bitrate: param.bitrate,
            user_limit: param.user_limit,
        });

        channel_id
    }

    fn insert_emoji(&mut self, name: &str) -> u64 {
        let emoji_id = self.next_id();

        self.emojis.push(GuildEmoji {
            emoji_id,
            name: name.to_string(),
            url: format!("https://cdn.discordapp.com/emojis/{}.png", emoji_id),
        });

        emoji_id
    }
}

fn not_found(kind: &str, id: u64) -> AppError {
    AppError::RemoteCall(format!("Unknown {} {}", kind, id))
}

#[async_trait]
impl GuildClient for FakeGuild {
    fn guild_id(&self) -> u64 {
        self.guild_id
    }

    async fn guild(&self) -> Result<GuildInfo, AppError> {
        Ok(self.call("guild", "")?.guild.clone())
    }

    async fn roles(&self) -> Result<Vec<GuildRole>, AppError> {
        Ok(self.call("roles", "")?.roles.clone())
    }

    async fn channels(&self) -> Result<Vec<GuildChannelInfo>, AppError> {
        Ok(self.call("channels", "")?.channels.clone())
    }

    async fn active_threads(&self) -> Result<Vec<ThreadInfo>, AppError> {
        Ok(self.call("active_threads", "")?.threads.clone())
    }

    async fn emojis(&self) -> Result<Vec<GuildEmoji>, AppError> {
        Ok(self.call("emojis", "")?.emojis.clone())
    }

    async fn bans(&self) -> Result<Vec<GuildBan>, AppError> {
        Ok(self.call("bans", "")?.bans.clone())
    }

    async fn webhooks(&self) -> Result<Vec<GuildWebhook>, AppError> {
        Ok(self.call("webhooks", "")?.webhooks.clone())
    }

    async fn members(&self) -> Result<Vec<GuildMember>, AppError> {
        Ok(self.call("members", "")?.members.clone())
    }

    async fn fetch_media(&self, url: &str) -> Result<MediaPayload, AppError> {
        drop(self.call("fetch_media", url)?);

        Ok(MediaPayload {
            content_type: "image/png".to_string(),
            bytes: url.as_bytes().to_vec(),
        })
    }

    async fn create_role(&self, param: CreateRoleParam) -> Result<GuildRole, AppError> {
        let mut state = self.call("create_role", &param.name)?;
        let role = GuildRole {
            role_id: state.next_id(),
            name: param.name,
            color: param.color,
            hoist: param.hoist,
            permissions: param.permissions,
            mentionable: param.mentionable,
            position: state.roles.len() as u16,
            managed: false,
        };
        state.roles.push(role.clone());

        Ok(role)
    }

    async fn edit_role(
        &self,
        role_id: u64,
        param: CreateRoleParam,
    ) -> Result<GuildRole, AppError> {
        let mut state = self.call("edit_role", role_id)?;
        let role = state
            .roles
            .iter_mut()
            .find(|role| role.role_id == role_id)
            .ok_or_else(|| not_found("role", role_id))?;

        if role_id != self.guild_id {
            role.name = param.name;
        }
        role.color = param.color;
        role.hoist = param.hoist;
        role.permissions = param.permissions;
        role.mentionable = param.mentionable;

        Ok(role.clone())
    }

    async fn delete_role(&self, role_id: u64) -> Result<(), AppError> {
        let mut state = self.call("delete_role", role_id)?;
        let index = state
            .roles
            .iter()
            .position(|role| role.role_id == role_id)
            .ok_or_else(|| not_found("role", role_id))?;

        if state.roles[index].managed || role_id == self.guild_id {
            return Err(AppError::RemoteCall("Missing Permissions".to_string()));
        }
        state.roles.remove(index);

        Ok(())
    }

    async fn create_channel(
        &self,
        param: CreateChannelParam,
    ) -> Result<GuildChannelInfo, AppError> {
        let mut state = self.call("create_channel", &param.name)?;
        let channel_id = state.insert_channel(param);

        state
            .channels
            .iter()
            .find(|channel| channel.channel_id == channel_id)
            .cloned()
            .ok_or_else(|| not_found("channel", channel_id))
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        let mut state = self.call("delete_channel", channel_id)?;
        let before = state.channels.len();
        state.channels.retain(|channel| channel.channel_id != channel_id);

        if state.channels.len() == before {
            return Err(not_found("channel", channel_id));
        }
        state
            .threads
            .retain(|thread| thread.parent_id != Some(channel_id));

        Ok(())
    }

    async fn create_thread(
        &self,
        channel_id: u64,
        param: CreateThreadParam,
    ) -> Result<ThreadInfo, AppError> {
        let mut state = self.call("create_thread", &param.name)?;
        let parent = state
            .channels
            .iter()
            .find(|channel| channel.channel_id == channel_id)
            .ok_or_else(|| not_found("channel", channel_id))?;
        if param.private && parent.kind == GuildChannelKind::News {
            return Err(AppError::RemoteCall("Invalid thread type".to_string()));
        }

        let thread = ThreadInfo {
            thread_id: state.next_id(),
            parent_id: Some(channel_id),
            name: param.name,
            archived: param.archived,
            auto_archive_duration: param.auto_archive_duration,
            locked: param.locked,
            rate_limit_per_user: param.rate_limit_per_user,
            private: param.private,
        };
        state.threads.push(thread.clone());

        Ok(thread)
    }

    async fn create_emoji(&self, name: &str, image: &str) -> Result<GuildEmoji, AppError> {
        let mut state = self.call("create_emoji", name)?;
        if !image.starts_with("data:") {
            return Err(AppError::RemoteCall("Invalid image data".to_string()));
        }
        let emoji_id = state.insert_emoji(name);

        state
            .emojis
            .iter()
            .find(|emoji| emoji.emoji_id == emoji_id)
            .cloned()
            .ok_or_else(|| not_found("emoji", emoji_id))
    }

    async fn delete_emoji(&self, emoji_id: u64) -> Result<(), AppError> {
        let mut state = self.call("delete_emoji", emoji_id)?;
        state.emojis.retain(|emoji| emoji.emoji_id != emoji_id);

        Ok(())
    }

    async fn delete_webhook(&self, webhook_id: u64) -> Result<(), AppError> {
        let mut state = self.call("delete_webhook", webhook_id)?;
        state
            .webhooks
            .retain(|webhook| webhook.webhook_id != webhook_id);

        Ok(())
    }

    async fn ban(&self, user_id: u64, reason: Option<&str>) -> Result<(), AppError> {
        let mut state = self.call("ban", user_id)?;
        state.bans.push(GuildBan {
            user_id,
            reason: reason.map(str::to_string),
        });

        Ok(())
    }

    async fn unban(&self, user_id: u64) -> Result<(), AppError> {
        let mut state = self.call("unban", user_id)?;
        state.bans.retain(|ban| ban.user_id != user_id);

        Ok(())
    }

    async fn edit_guild(&self, param: EditGuildParam) -> Result<(), AppError> {
        let mut state = self.call("edit_guild", "")?;
        if let Some(flags) = param.system_channel_flags {
            state.system_channel_flags = flags;
        }
        let guild = &mut state.guild;

        if let Some(name) = param.name {
            guild.name = name;
        }
        if let Some(level) = param.verification_level {
            guild.verification_level = level;
        }
        if let Some(filter) = param.explicit_content_filter {
            guild.explicit_content_filter = filter;
        }
        if let Some(notifications) = param.default_message_notifications {
            guild.default_message_notifications = notifications;
        }
        if let Some(afk_channel_id) = param.afk_channel_id {
            guild.afk_channel_id = afk_channel_id;
        }
        if let Some(afk_timeout) = param.afk_timeout {
            guild.afk_timeout = afk_timeout;
        }
        if let Some(icon) = param.icon {
            guild.icon_url = icon;
        }
        if let Some(splash) = param.splash {
            guild.splash_url = splash;
        }
        if let Some(banner) = param.banner {
            guild.banner_url = banner;
        }
        if let Some(system_channel_id) = param.system_channel_id {
            guild.system_channel_id = system_channel_id;
        }

        Ok(())
    }

    async fn edit_widget(&self, enabled: bool, channel_id: Option<u64>) -> Result<(), AppError> {
        let mut state = self.call("edit_widget", enabled)?;
        state.guild.widget_enabled = enabled;
        state.guild.widget_channel_id = channel_id;

        Ok(())
    }
}
