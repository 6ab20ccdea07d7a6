pub mod search;
pub mod settings;
pub mod utility;

use twilight_model::{
    application::interaction::InteractionData,
    gateway::payload::incoming::{InteractionCreate, MessageCreate},
};

use aika_core::Context;
use aika_database::settings::guild_prefix;
use aika_utils::DEFAULT_COMMAND_PREFIX;

#[derive(Clone, Copy)]
enum InteractionRoute {
    AnimeButtons,
    AnimeModal,
    MangaButtons,
    MangaModal,
    CharacterButtons,
    CharacterModal,
    StaffButtons,
    StaffModal,
    StudioButtons,
    StudioModal,
    HelpButtons,
}

fn route_interaction(custom_id: &str) -> Option<InteractionRoute> {
    const ROUTES: [(&str, InteractionRoute); 11] = [
        ("nav:anime:", InteractionRoute::AnimeButtons),
        ("nav:manga:", InteractionRoute::MangaButtons),
        ("nav:character:", InteractionRoute::CharacterButtons),
        ("nav:staff:", InteractionRoute::StaffButtons),
        ("nav:studio:", InteractionRoute::StudioButtons),
        ("nav:help:", InteractionRoute::HelpButtons),
        ("navm:anime:", InteractionRoute::AnimeModal),
        ("navm:manga:", InteractionRoute::MangaModal),
        ("navm:character:", InteractionRoute::CharacterModal),
        ("navm:staff:", InteractionRoute::StaffModal),
        ("navm:studio:", InteractionRoute::StudioModal),
    ];

    ROUTES
        .into_iter()
        .find_map(|(prefix, route)| custom_id.starts_with(prefix).then_some(route))
}

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    search::media::ANIME_META,
    search::media::MANGA_META,
    search::character::META,
    search::staff::META,
    search::studio::META,
    search::random::META,
    search::user::META,
    settings::prefix::META,
    // Add new commands here
];

/// Resolve the message prefix for a guild, reading through the prefix cache.
///
/// Direct messages and unconfigured guilds use the default prefix. Resolved
/// values (including the default) are cached so a chatty guild costs one
/// settings query per cache period.
pub async fn resolve_prefix(ctx: &Context, guild_id: Option<u64>) -> String {
    let Some(guild_id) = guild_id else {
        return DEFAULT_COMMAND_PREFIX.to_owned();
    };

    if let Ok(mut cache) = ctx.prefixes.lock()
        && let Some(prefix) = cache.get(&guild_id)
    {
        return prefix;
    }

    let prefix = match guild_prefix(&ctx.db, guild_id).await {
        Ok(stored) => stored.unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_owned()),
        Err(source) => {
            tracing::warn!(?source, guild_id, "prefix lookup failed, using default");
            return DEFAULT_COMMAND_PREFIX.to_owned();
        }
    };

    if let Ok(mut cache) = ctx.prefixes.lock() {
        cache.insert(guild_id, prefix.clone());
    }

    prefix
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let prefix = resolve_prefix(&ctx, msg.guild_id.map(|id| id.get())).await;

    let content_owned = msg.content.clone();
    let content = content_owned.trim();

    let Some(content) = content.strip_prefix(&prefix) else {
        return Ok(());
    };

    let mut command_and_rest = content.trim().splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match cmd.as_str() {
        "ping" => utility::ping::run(ctx.clone(), msg).await?,
        "help" => utility::help::run(ctx.clone(), msg, rest).await?,
        "usage" => utility::usage::run(ctx.clone(), msg, rest).await?,

        "anime" => search::media::run_anime(ctx.clone(), msg, rest).await?,
        "manga" => search::media::run_manga(ctx.clone(), msg, rest).await?,
        "character" => search::character::run(ctx.clone(), msg, rest).await?,
        "staff" => search::staff::run(ctx.clone(), msg, rest).await?,
        "studio" => search::studio::run(ctx.clone(), msg, rest).await?,
        "random" => search::random::run(ctx.clone(), msg, rest).await?,
        "user" => search::user::run(ctx.clone(), msg, rest).await?,

        "prefix" => settings::prefix::run(ctx.clone(), msg, rest).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let custom_id = match interaction.data.as_ref() {
        Some(InteractionData::MessageComponent(data)) => data.custom_id.clone(),
        Some(InteractionData::ModalSubmit(data)) => data.custom_id.clone(),
        _ => return Ok(()),
    };

    let Some(route) = route_interaction(&custom_id) else {
        return Ok(());
    };

    match route {
        InteractionRoute::AnimeButtons => {
            let _handled =
                search::handle_lazy_nav(ctx.clone(), interaction, "anime").await?;
        }
        InteractionRoute::MangaButtons => {
            let _handled =
                search::handle_lazy_nav(ctx.clone(), interaction, "manga").await?;
        }
        InteractionRoute::CharacterButtons => {
            let _handled =
                search::handle_lazy_nav(ctx.clone(), interaction, "character").await?;
        }
        InteractionRoute::StaffButtons => {
            let _handled = search::handle_lazy_nav(ctx.clone(), interaction, "staff").await?;
        }
        InteractionRoute::StudioButtons => {
            let _handled =
                search::handle_lazy_nav(ctx.clone(), interaction, "studio").await?;
        }
        InteractionRoute::HelpButtons => {
            let _handled =
                utility::help::handle_pagination_interaction(ctx.clone(), interaction).await?;
        }
        InteractionRoute::AnimeModal => {
            let _handled =
                search::handle_lazy_jump_modal(ctx.clone(), interaction, "anime").await?;
        }
        InteractionRoute::MangaModal => {
            let _handled =
                search::handle_lazy_jump_modal(ctx.clone(), interaction, "manga").await?;
        }
        InteractionRoute::CharacterModal => {
            let _handled =
                search::handle_lazy_jump_modal(ctx.clone(), interaction, "character").await?;
        }
        InteractionRoute::StaffModal => {
            let _handled =
                search::handle_lazy_jump_modal(ctx.clone(), interaction, "staff").await?;
        }
        InteractionRoute::StudioModal => {
            let _handled =
                search::handle_lazy_jump_modal(ctx.clone(), interaction, "studio").await?;
        }
    }

    Ok(())
}
