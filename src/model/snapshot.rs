//! Backup document models.
//!
//! A `Snapshot` is the complete, portable capture of a guild's structure. It is
//! assembled in one pass by the capture pipeline, written to the backup store as JSON,
//! and replayed by the restore pipeline. Cross references inside a snapshot (AFK
//! channel, widget channel, channel parents, overwrite roles) are stored by name since
//! ids do not survive a move to another guild.

use serde::{Deserialize, Serialize};

use crate::model::{
    ban::BanData, channel::ChannelsData, emoji::EmojiData, member::MemberData, role::RoleData,
};

/// Full serialized capture of a guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: String,
    #[serde(rename = "guildID")]
    pub guild_id: String,
    /// Milliseconds since the Unix epoch.
    pub created_timestamp: i64,

    pub name: String,
    pub verification_level: u8,
    pub explicit_content_filter: u8,
    pub default_message_notifications: u8,
    pub afk: Option<AfkData>,
    pub widget: WidgetData,

    #[serde(rename = "iconURL", default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_base64: Option<String>,
    #[serde(rename = "splashURL", default, skip_serializing_if = "Option::is_none")]
    pub splash_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splash_base64: Option<String>,
    #[serde(rename = "bannerURL", default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_base64: Option<String>,

    #[serde(default)]
    pub roles: Vec<RoleData>,
    #[serde(default)]
    pub bans: Vec<BanData>,
    #[serde(default)]
    pub emojis: Vec<EmojiData>,
    #[serde(default)]
    pub members: Vec<MemberData>,
    #[serde(default)]
    pub channels: ChannelsData,
}

/// AFK channel reference, stored by channel name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AfkData {
    pub name: String,
    /// Seconds of inactivity before a member is moved.
    pub timeout: u16,
}

/// Server widget settings; `channel` holds a channel name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetData {
    pub enabled: bool,
    pub channel: Option<String>,
}

/// Result of looking up a stored backup.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupInfo {
    pub data: Snapshot,
    pub id: String,
    /// Size of the stored document in KiB.
    pub size: f64,
}
