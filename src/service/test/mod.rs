use crate::{
    data::BackupRepository,
    model::guild::{GuildChannelKind, GuildOverwrite, OverwriteTarget},
};
use test_utils::{builder::TestBuilder, context::TestContext};

mod fake_guild;


use fake_guild::FakeGuild;

const SOURCE_GUILD_ID: u64 = 100_000;
const TARGET_GUILD_ID: u64 = 200_000;

/// Builds a populated source guild.
///
/// Roles `Moderators`, `Members` and the managed `Bot Role`; a `General` category
/// holding text channel `chat` (with thread `help`) and announcement channel `news`;
/// top-level voice channel `Lounge` set as AFK channel; emoji `wave`; one ban, one
/// webhook and one member. Boost tier 1.
fn seeded_guild() -> FakeGuild {
    let guild = FakeGuild::new(SOURCE_GUILD_ID);
    guild.set_premium_tier(1);
    guild.add_feature("NEWS");

    let moderators = guild.add_role("Moderators", 8192, false);
    let members = guild.add_role("Members", 1024, false);
    guild.add_role("Bot Role", 8, true);

    let general = guild.add_channel(
        "General",
        GuildChannelKind::Category,
        None,
        vec![role_overwrite(moderators, 2048, 0)],
    );
    let chat = guild.add_channel(
        "chat",
        GuildChannelKind::Text,
        Some(general),
        vec![
            role_overwrite(SOURCE_GUILD_ID, 0, 2048),
            role_overwrite(moderators, 2048, 0),
            GuildOverwrite {
                target: OverwriteTarget::Member(555),
                allow: 1024,
                deny: 0,
            },
        ],
    );
    guild.add_channel("news", GuildChannelKind::News, Some(general), Vec::new());
    let lounge = guild.add_channel("Lounge", GuildChannelKind::Voice, None, Vec::new());
    guild.add_thread(chat, "help");

    guild.add_emoji("wave");
    guild.add_ban(700_000_000_000_000_001, Some("spam"));
    guild.add_webhook();
    guild.add_member(555, "alice", vec![SOURCE_GUILD_ID, members]);

    {
        let mut state = guild.state();
        state.guild.name = "Source Guild".to_string();
        state.guild.verification_level = 2;
        state.guild.explicit_content_filter = 1;
        state.guild.default_message_notifications = 1;
        state.guild.afk_channel_id = Some(lounge);
        state.guild.afk_timeout = 900;
        state.guild.icon_url =
            Some("https://cdn.discordapp.com/icons/100000/abc.png".to_string());
        state
            .channels
            .iter_mut()
            .filter(|channel| channel.channel_id == lounge)
            .for_each(|channel| channel.bitrate = Some(96_000));
    }

    guild
}

fn role_overwrite(role_id: u64, allow: u64, deny: u64) -> GuildOverwrite {
    GuildOverwrite {
        target: OverwriteTarget::Role(role_id),
        allow,
        deny,
    }
}

/// Creates an isolated test context and a repository rooted in its storage.
fn repository() -> (TestContext, BackupRepository) {
    let test = TestBuilder::new().build().unwrap();
    let repo = BackupRepository::new(test.storage_dir().unwrap()).unwrap();

    (test, repo)
}
