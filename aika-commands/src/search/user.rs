use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::search::embeds::user_embed;
use crate::utility::embeds::usage_message;
use aika_core::Context;
use aika_utils::parse::sanitize_mentions;

pub const META: CommandMeta = CommandMeta {
    name: "user",
    desc: "Show an AniList user profile.",
    category: "search",
    usage: "!user <name>",
};

/// Look up an AniList user profile by name.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, rest: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let Some(name) = rest.and_then(|value| value.split_whitespace().next()) else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let Some(user) = ctx.anilist.find_user(name).await? else {
        let out = format!("No AniList user named `{}`.", sanitize_mentions(name));
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    };

    let embed = user_embed(&user)?;
    http.create_message(msg.channel_id).embeds(&[embed]).await?;

    Ok(())
}
