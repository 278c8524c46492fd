use serde_json::{json, Value};

/// Creates a backup document with the given id and a small default guild.
///
/// The guild has an `@everyone` role, one `Moderators` role, a `General` category with
/// a `chat` text channel denied to `@everyone`, and a top-level `Lounge` voice channel.
///
/// # Arguments
/// - `id` - Backup id, also used as the stored file name
pub fn document(id: &str) -> Value {
    document_for_guild(id, "900000000000000001", "Fixture Guild")
}

/// Creates a backup document for a specific source guild.
///
/// # Arguments
/// - `id` - Backup id
/// - `guild_id` - Source guild id as a string
/// - `name` - Guild name
pub fn document_for_guild(id: &str, guild_id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "guildID": guild_id,
        "createdTimestamp": 1_700_000_000_000i64,
        "name": name,
        "verificationLevel": 1,
        "explicitContentFilter": 2,
        "defaultMessageNotifications": 1,
        "afk": { "name": "Lounge", "timeout": 900 },
        "widget": { "enabled": false, "channel": null },
        "iconURL": "https://cdn.discordapp.com/icons/900000000000000001/abc.png",
        "roles": [
            {
                "name": "Moderators",
                "color": 3447003,
                "hoist": true,
                "permissions": "8192",
                "mentionable": true,
                "position": 1,
                "isEveryone": false
            },
            {
                "name": "@everyone",
                "color": 0,
                "hoist": false,
                "permissions": "104324673",
                "mentionable": false,
                "position": 0,
                "isEveryone": true
            }
        ],
        "bans": [
            { "id": "700000000000000001", "reason": "spam" }
        ],
        "emojis": [
            {
                "name": "wave",
                "url": "https://cdn.discordapp.com/emojis/800000000000000001.png"
            }
        ],
        "members": [],
        "channels": {
            "categories": [
                {
                    "name": "General",
                    "permissions": [],
                    "children": [
                        {
                            "type": "text",
                            "name": "chat",
                            "parent": "General",
                            "permissions": [
                                { "roleName": "@everyone", "allow": "0", "deny": "2048" },
                                { "roleName": "Moderators", "allow": "2048", "deny": "0" }
                            ],
                            "nsfw": false,
                            "rateLimitPerUser": 5,
                            "topic": "Talk here",
                            "isNews": false,
                            "threads": [
                                {
                                    "name": "help",
                                    "archived": false,
                                    "autoArchiveDuration": 1440,
                                    "locked": false,
                                    "rateLimitPerUser": null,
                                    "private": false
                                }
                            ]
                        }
                    ]
                }
            ],
            "others": [
                {
                    "type": "voice",
                    "name": "Lounge",
                    "parent": null,
                    "permissions": [],
                    "bitrate": 96000,
                    "userLimit": 10
                }
            ]
        }
    })
}
