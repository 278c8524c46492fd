//! Test factory for creating Serenity GuildChannel objects.

use serenity::all::GuildChannel;

/// Creates a test Serenity GuildChannel.
///
/// Creates a GuildChannel by deserializing JSON with the provided values. Text and
/// announcement channels get a topic and a 5 second slowmode; voice channels get a
/// 96 kbps bitrate and a user limit of 10.
///
/// # Arguments
/// - `channel_id` - Discord channel ID (snowflake)
/// - `name` - Channel name
/// - `kind` - Discord channel type number (0 text, 2 voice, 4 category, 5 news)
/// - `parent_id` - Optional parent category ID
/// - `role_overwrites` - `(role_id, allow, deny)` permission overwrites
///
/// # Returns
/// - `GuildChannel` - A valid Serenity GuildChannel struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
pub fn create_test_channel(
    channel_id: u64,
    name: &str,
    kind: u8,
    parent_id: Option<u64>,
    role_overwrites: &[(u64, u64, u64)],
) -> GuildChannel {
    let is_voice = kind == 2 || kind == 13;
    let (topic, rate_limit, bitrate, user_limit) = if is_voice {
        (None, None, Some(96000), Some(10))
    } else {
        (Some("Channel topic"), Some(5), None, None)
    };

    let overwrites: Vec<serde_json::Value> = role_overwrites
        .iter()
        .map(|(role_id, allow, deny)| {
            serde_json::json!({
                "id": role_id.to_string(),
                "type": 0,
                "allow": allow.to_string(),
                "deny": deny.to_string(),
            })
        })
        .collect();

    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "type": kind,
        "guild_id": "900000000000000001",
        "name": name,
        "position": 0,
        "permission_overwrites": overwrites,
        "parent_id": parent_id.map(|id| id.to_string()),
        "nsfw": false,
        "topic": topic,
        "rate_limit_per_user": rate_limit,
        "bitrate": bitrate,
        "user_limit": user_limit,
        "last_message_id": null,
        "flags": 0,
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}
