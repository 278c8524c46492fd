//! Live guild domain models.
//!
//! These types describe a guild as read from, or written to, the remote Discord API
//! through a `GuildClient`. They carry raw ids so the pipelines can resolve
//! references; backup documents never contain them.

/// Guild feature flag marking a community server.
pub const FEATURE_COMMUNITY: &str = "COMMUNITY";
/// Guild feature flag allowing announcement channels.
pub const FEATURE_NEWS: &str = "NEWS";

/// Scalar guild settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuildInfo {
    pub guild_id: u64,
    pub name: String,
    pub verification_level: u8,
    pub explicit_content_filter: u8,
    pub default_message_notifications: u8,
    pub afk_channel_id: Option<u64>,
    pub afk_timeout: u16,
    pub widget_enabled: bool,
    pub widget_channel_id: Option<u64>,
    pub system_channel_id: Option<u64>,
    pub icon_url: Option<String>,
    pub splash_url: Option<String>,
    pub banner_url: Option<String>,
    /// Boost tier, 0 through 3.
    pub premium_tier: u8,
    pub features: Vec<String>,
}

impl GuildInfo {
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Highest voice bitrate in bits per second allowed at the guild's boost tier.
    pub fn max_bitrate(&self) -> u32 {
        match self.premium_tier {
            0 => 64_000,
            1 => 128_000,
            2 => 256_000,
            _ => 384_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuildRole {
    pub role_id: u64,
    pub name: String,
    pub color: u32,
    pub hoist: bool,
    pub permissions: u64,
    pub mentionable: bool,
    pub position: u16,
    /// Owned by an integration; cannot be created or deleted by a bot.
    pub managed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuildChannelKind {
    Category,
    Text,
    News,
    Voice,
    Stage,
    Other,
}

impl GuildChannelKind {
    pub fn is_text_like(self) -> bool {
        matches!(self, Self::Text | Self::News)
    }

    pub fn is_voice_like(self) -> bool {
        matches!(self, Self::Voice | Self::Stage)
    }
}

/// Target of a permission overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteTarget {
    Role(u64),
    Member(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuildOverwrite {
    pub target: OverwriteTarget,
    pub allow: u64,
    pub deny: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuildChannelInfo {
    pub channel_id: u64,
    pub kind: GuildChannelKind,
    pub name: String,
    pub parent_id: Option<u64>,
    pub position: u16,
    pub overwrites: Vec<GuildOverwrite>,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub rate_limit_per_user: Option<u16>,
    pub bitrate: Option<u32>,
    pub user_limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreadInfo {
    pub thread_id: u64,
    pub parent_id: Option<u64>,
    pub name: String,
    pub archived: bool,
    pub auto_archive_duration: u16,
    pub locked: bool,
    pub rate_limit_per_user: Option<u16>,
    pub private: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuildEmoji {
    pub emoji_id: u64,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuildBan {
    pub user_id: u64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuildWebhook {
    pub webhook_id: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuildMember {
    pub user_id: u64,
    pub username: String,
    pub discriminator: Option<u16>,
    pub avatar_url: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub joined_at: Option<i64>,
    pub role_ids: Vec<u64>,
    pub bot: bool,
}

/// Downloaded media file.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaPayload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Parameters for creating or editing a role.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRoleParam {
    pub name: String,
    pub color: u32,
    pub hoist: bool,
    pub permissions: u64,
    pub mentionable: bool,
}

/// Parameters for creating a channel, overwrites already resolved to role ids.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateChannelParam {
    pub name: String,
    pub kind: GuildChannelKind,
    pub parent_id: Option<u64>,
    pub overwrites: Vec<GuildOverwrite>,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub rate_limit_per_user: Option<u16>,
    pub bitrate: Option<u32>,
    pub user_limit: Option<u32>,
}

impl CreateChannelParam {
    pub fn new(name: impl Into<String>, kind: GuildChannelKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent_id: None,
            overwrites: Vec::new(),
            topic: None,
            nsfw: false,
            rate_limit_per_user: None,
            bitrate: None,
            user_limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateThreadParam {
    pub name: String,
    pub auto_archive_duration: u16,
    pub rate_limit_per_user: Option<u16>,
    pub private: bool,
    pub archived: bool,
    pub locked: bool,
}

/// Partial guild edit.
///
/// `None` leaves a field untouched. For nullable settings the inner `Option` is the
/// new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditGuildParam {
    pub name: Option<String>,
    pub verification_level: Option<u8>,
    pub explicit_content_filter: Option<u8>,
    pub default_message_notifications: Option<u8>,
    pub afk_channel_id: Option<Option<u64>>,
    pub afk_timeout: Option<u16>,
    /// Images as `data:` URIs.
    pub icon: Option<Option<String>>,
    pub splash: Option<Option<String>>,
    pub banner: Option<Option<String>>,
    pub system_channel_id: Option<Option<u64>>,
    pub system_channel_flags: Option<u64>,
}
