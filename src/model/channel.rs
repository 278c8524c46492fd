//! Channel tree models.
//!
//! Channels are split into categories (each owning its children) and top-level
//! channels with no category. Every non-category channel is either text-like or
//! voice-like; the `type` tag in JSON selects the variant.

use serde::{Deserialize, Serialize};

use crate::util::serde_string::{deserialize_u64_from_string, serialize_u64_as_string};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelsData {
    pub categories: Vec<CategoryData>,
    pub others: Vec<ChannelData>,
}

impl ChannelsData {
    /// Returns true if no category and no top-level channel was captured.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.others.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryData {
    pub name: String,
    pub permissions: Vec<PermissionOverwriteData>,
    pub children: Vec<ChannelData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChannelData {
    Text(TextChannelData),
    Voice(VoiceChannelData),
}

impl ChannelData {
    pub fn name(&self) -> &str {
        match self {
            Self::Text(text) => &text.name,
            Self::Voice(voice) => &voice.name,
        }
    }

    pub fn parent(&self) -> Option<&str> {
        match self {
            Self::Text(text) => text.parent.as_deref(),
            Self::Voice(voice) => voice.parent.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChannelData {
    pub name: String,
    /// Name of the parent category.
    pub parent: Option<String>,
    pub permissions: Vec<PermissionOverwriteData>,
    pub nsfw: bool,
    pub rate_limit_per_user: Option<u16>,
    pub topic: Option<String>,
    /// Announcement channel.
    pub is_news: bool,
    #[serde(default)]
    pub threads: Vec<ThreadData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceChannelData {
    pub name: String,
    pub parent: Option<String>,
    pub permissions: Vec<PermissionOverwriteData>,
    pub bitrate: u32,
    pub user_limit: u32,
}

/// Thread metadata. Message history is never captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadData {
    pub name: String,
    pub archived: bool,
    /// Minutes of inactivity before the thread auto archives.
    pub auto_archive_duration: u16,
    pub locked: bool,
    pub rate_limit_per_user: Option<u16>,
    #[serde(default)]
    pub private: bool,
}

/// Per-role permission overwrite, keyed by role name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionOverwriteData {
    pub role_name: String,
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub allow: u64,
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub deny: u64,
}
