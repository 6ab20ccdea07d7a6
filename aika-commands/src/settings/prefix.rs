use twilight_model::{gateway::payload::incoming::MessageCreate, guild::Permissions};

use crate::CommandMeta;
use crate::resolve_prefix;
use crate::utility::embeds::{guild_only_message, usage_message};
use aika_core::Context;
use aika_database::settings::set_guild_prefix;
use aika_utils::permissions::has_message_permission;

pub const META: CommandMeta = CommandMeta {
    name: "prefix",
    desc: "Show or set this server's command prefix.",
    category: "settings",
    usage: "!prefix [new-prefix]",
};

const MAX_PREFIX_CHARS: usize = 5;

/// Show the current prefix, or set a new one (Manage Server required).
pub async fn run(ctx: Context, msg: Box<MessageCreate>, rest: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let Some(guild_id) = msg.guild_id else {
        http.create_message(msg.channel_id)
            .content(guild_only_message())
            .await?;
        return Ok(());
    };

    let Some(new_prefix) = rest.and_then(|value| value.split_whitespace().next()) else {
        let current = resolve_prefix(&ctx, Some(guild_id.get())).await;
        let out = format!("Current command prefix: `{current}`");
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    };

    if !has_message_permission(http, &msg, Permissions::MANAGE_GUILD).await? {
        http.create_message(msg.channel_id)
            .content("You need Manage Server permissions to change the prefix.")
            .await?;
        return Ok(());
    }

    if new_prefix.chars().count() > MAX_PREFIX_CHARS {
        let out = format!(
            "Prefix must be at most {MAX_PREFIX_CHARS} characters. {}",
            usage_message(META.usage)
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    set_guild_prefix(&ctx.db, guild_id.get(), new_prefix).await?;

    if let Ok(mut cache) = ctx.prefixes.lock() {
        cache.insert(guild_id.get(), new_prefix.to_owned());
    }

    let out = format!("Command prefix set to `{new_prefix}`");
    http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}
