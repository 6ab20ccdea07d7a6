use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::search::embeds::media_embed;
use aika_anilist::MediaKind;
use aika_core::Context;

pub const META: CommandMeta = CommandMeta {
    name: "random",
    desc: "Show a random anime or manga.",
    category: "search",
    usage: "!random [anime|manga]",
};

/// Pick and show a random media entry.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, rest: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let kind = match rest.and_then(|value| value.split_whitespace().next()) {
        Some(raw) if raw.eq_ignore_ascii_case("manga") => MediaKind::Manga,
        _ => MediaKind::Anime,
    };

    let Some(media) = ctx.anilist.random_media(kind).await? else {
        let out = format!("Couldn't find a random {}.", kind.label());
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    };

    let embed = media_embed(&media, 1, 1)?;
    http.create_message(msg.channel_id).embeds(&[embed]).await?;

    Ok(())
}
