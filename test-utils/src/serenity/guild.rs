//! Test factory for creating Serenity PartialGuild objects.
//!
//! Guild settings are read through the REST API, which returns partial guilds.
//! These factories create valid PartialGuild objects by deserializing JSON,
//! simulating what Discord's API would return.

use serenity::all::PartialGuild;

/// Creates a test Serenity PartialGuild with customizable fields.
///
/// The icon hash is automatically padded to 32 characters (Discord's icon hash format)
/// if it's shorter. AFK settings point at `afk_channel_id` with a 900 second timeout
/// when provided. All other fields are set to reasonable defaults.
///
/// # Arguments
/// - `guild_id` - Discord guild ID (snowflake)
/// - `name` - Guild name
/// - `icon_hash` - Optional icon hash (will be padded to 32 characters if shorter)
/// - `afk_channel_id` - Optional AFK voice channel
/// - `premium_tier` - Boost tier, 0 through 3
/// - `features` - Guild feature flags such as `COMMUNITY`
///
/// # Returns
/// - `PartialGuild` - A valid Serenity PartialGuild struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a PartialGuild (indicates invalid test data)
pub fn create_test_partial_guild(
    guild_id: u64,
    name: &str,
    icon_hash: Option<&str>,
    afk_channel_id: Option<u64>,
    premium_tier: u8,
    features: &[&str],
) -> PartialGuild {
    // Pad icon hash to be 32 characters if provided (Discord icon hash format)
    let formatted_icon = icon_hash.map(|hash| {
        if hash.len() < 32 {
            format!("{:0<32}", hash)
        } else {
            hash.to_string()
        }
    });

    serde_json::from_value(serde_json::json!({
        "id": guild_id.to_string(),
        "name": name,
        "icon": formatted_icon,
        "icon_hash": formatted_icon,
        "splash": null,
        "discovery_splash": null,
        "banner": null,
        "owner_id": "100000000000000000",
        "afk_channel_id": afk_channel_id.map(|id| id.to_string()),
        "afk_timeout": 900,
        "widget_enabled": false,
        "widget_channel_id": null,
        "verification_level": 2,
        "default_message_notifications": 1,
        "explicit_content_filter": 2,
        "roles": [],
        "emojis": [],
        "stickers": [],
        "features": features,
        "mfa_level": 0,
        "application_id": null,
        "system_channel_id": null,
        "system_channel_flags": 0,
        "rules_channel_id": null,
        "public_updates_channel_id": null,
        "vanity_url_code": null,
        "description": null,
        "premium_tier": premium_tier,
        "premium_subscription_count": 0,
        "premium_progress_bar_enabled": false,
        "preferred_locale": "en-US",
        "nsfw_level": 0,
        "max_members": 100000,
        "max_video_channel_users": 25,
    }))
    .expect("Failed to create test partial guild - invalid JSON structure")
}
