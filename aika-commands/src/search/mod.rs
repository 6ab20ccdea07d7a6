//! AniList search commands and their shared lazy pagination driver.

pub mod character;
pub mod embeds;
pub mod media;
pub mod random;
pub mod staff;
pub mod studio;
pub mod user;

use std::sync::Arc;

use anyhow::Context as _;
use twilight_model::{
    channel::message::embed::Embed,
    gateway::payload::incoming::InteractionCreate,
    id::{Id, marker::ChannelMarker},
};

use aika_core::Context;
use aika_utils::pagination::{
    ChunkFetcher, JUMP_TIMEOUT_SECS, LazySession, NavAction, NavInteractionValidation,
    NavModalValidation, Pager, build_nav_components, delete_paginated_message,
    open_jump_modal_from_token, respond_ephemeral_message, send_paginated_message,
    update_paginated_interaction_message, validate_jump_modal, validate_nav_interaction,
};
use aika_utils::pagination::respond::{respond_expired, respond_invalid};

/// Results fetched per AniList page; one result renders as one view page.
pub const ITEMS_PER_CHUNK: usize = 5;

/// Send the first page of a search and register its lazy session.
///
/// `first_chunk` is the eagerly fetched chunk 0 (needed anyway to learn the
/// total count); remaining chunks materialize on demand through `fetcher`.
pub(crate) async fn start_lazy_search(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    owner_id: u64,
    command: &'static str,
    total_items: usize,
    first_chunk: Vec<Embed>,
    fetcher: Arc<dyn ChunkFetcher>,
) -> anyhow::Result<()> {
    let first_page = first_chunk
        .first()
        .cloned()
        .context("search produced an empty first chunk")?;

    let pager = Pager::new(total_items, Some(owner_id));
    let components = build_nav_components(command, &pager, JUMP_TIMEOUT_SECS);

    let message_id = send_paginated_message(
        Arc::clone(&ctx.http),
        &ctx.cleanup,
        channel_id,
        first_page,
        components,
        total_items,
        JUMP_TIMEOUT_SECS,
    )
    .await?;

    if total_items > 1 {
        let mut session = LazySession::new(
            command,
            owner_id,
            total_items,
            ITEMS_PER_CHUNK,
            fetcher,
            JUMP_TIMEOUT_SECS,
        );
        session.seed_chunk(0, first_chunk);
        ctx.sessions.insert(message_id.get(), session).await;
    }

    Ok(())
}

/// Handle navigation button presses for a lazy search command.
pub async fn handle_lazy_nav(
    ctx: Context,
    interaction: Box<InteractionCreate>,
    command: &'static str,
) -> anyhow::Result<bool> {
    let http = &ctx.http;
    let token = match validate_nav_interaction(http, &interaction, command).await? {
        NavInteractionValidation::NotForCommand => return Ok(false),
        NavInteractionValidation::HandledInvalid => return Ok(true),
        NavInteractionValidation::Valid { token, .. } => token,
    };

    let Some(message) = interaction.message.as_ref() else {
        respond_invalid(http, &interaction).await?;
        return Ok(true);
    };
    let message_key = message.id.get();

    match token.action {
        NavAction::Close => {
            ctx.cleanup.cancel(message.id).await;
            ctx.sessions.remove(message_key).await;
            delete_paginated_message(http, &interaction).await?;
            Ok(true)
        }
        NavAction::Jump => {
            let Some(pager) = ctx.sessions.pager(message_key).await else {
                respond_expired(http, &interaction).await?;
                return Ok(true);
            };
            open_jump_modal_from_token(http, &interaction, &token, pager.len()).await?;
            Ok(true)
        }
        NavAction::Prev | NavAction::Next => {
            let target_index = token.page.saturating_sub(1);
            render_lazy_page(&ctx, &interaction, command, message_key, target_index).await?;
            Ok(true)
        }
    }
}

/// Handle jump-modal submissions for a lazy search command.
pub async fn handle_lazy_jump_modal(
    ctx: Context,
    interaction: Box<InteractionCreate>,
    command: &'static str,
) -> anyhow::Result<bool> {
    let http = &ctx.http;
    let entered = match validate_jump_modal(http, &interaction, command).await? {
        NavModalValidation::NotForCommand => return Ok(false),
        NavModalValidation::HandledInvalid => return Ok(true),
        NavModalValidation::Valid { entered, .. } => entered,
    };

    let Some(message) = interaction.message.as_ref() else {
        respond_invalid(http, &interaction).await?;
        return Ok(true);
    };
    let message_key = message.id.get();

    let Some(mut pager) = ctx.sessions.pager(message_key).await else {
        respond_expired(http, &interaction).await?;
        return Ok(true);
    };

    if let Err(out_of_range) = pager.jump(&entered) {
        respond_ephemeral_message(http, &interaction, &out_of_range.to_string()).await?;
        return Ok(true);
    }

    render_lazy_page(&ctx, &interaction, command, message_key, pager.cursor()).await?;
    Ok(true)
}

async fn render_lazy_page(
    ctx: &Context,
    interaction: &InteractionCreate,
    command: &'static str,
    message_key: u64,
    index: usize,
) -> anyhow::Result<()> {
    let Some(embed) = ctx.sessions.page(message_key, index).await? else {
        respond_expired(&ctx.http, interaction).await?;
        return Ok(());
    };

    let Some(pager) = ctx.sessions.pager(message_key).await else {
        respond_expired(&ctx.http, interaction).await?;
        return Ok(());
    };

    let components = build_nav_components(command, &pager, JUMP_TIMEOUT_SECS);

    update_paginated_interaction_message(
        Arc::clone(&ctx.http),
        &ctx.cleanup,
        interaction,
        embed,
        components,
        pager.len(),
        JUMP_TIMEOUT_SECS,
    )
    .await
}
