use serde_json::{json, Value};
use test_utils::serenity::{
    create_test_channel, create_test_managed_role, create_test_partial_guild, create_test_role,
};

use crate::{
    discord::serenity_client::{collect_pages, edit_guild_map},
    error::AppError,
    model::guild::{
        EditGuildParam, GuildChannelInfo, GuildChannelKind, GuildInfo, GuildOverwrite, GuildRole,
        OverwriteTarget,
    },
};
