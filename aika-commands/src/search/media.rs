use std::sync::Arc;

use async_trait::async_trait;
use twilight_model::{channel::message::embed::Embed, gateway::payload::incoming::MessageCreate};

use crate::CommandMeta;
use crate::search::embeds::{media_embed, no_results_message};
use crate::search::{ITEMS_PER_CHUNK, start_lazy_search};
use crate::utility::embeds::usage_message;
use aika_anilist::{AniListClient, MediaKind};
use aika_anilist::model::Media;
use aika_core::Context;
use aika_utils::pagination::ChunkFetcher;

pub const ANIME_META: CommandMeta = CommandMeta {
    name: "anime",
    desc: "Search AniList for anime by title.",
    category: "search",
    usage: "!anime <title>",
};

pub const MANGA_META: CommandMeta = CommandMeta {
    name: "manga",
    desc: "Search AniList for manga by title.",
    category: "search",
    usage: "!manga <title>",
};

/// Search anime and page through the results.
pub async fn run_anime(
    ctx: Context,
    msg: Box<MessageCreate>,
    rest: Option<&str>,
) -> anyhow::Result<()> {
    run_media_search(ctx, msg, MediaKind::Anime, rest, ANIME_META.usage).await
}

/// Search manga and page through the results.
pub async fn run_manga(
    ctx: Context,
    msg: Box<MessageCreate>,
    rest: Option<&str>,
) -> anyhow::Result<()> {
    run_media_search(ctx, msg, MediaKind::Manga, rest, MANGA_META.usage).await
}

async fn run_media_search(
    ctx: Context,
    msg: Box<MessageCreate>,
    kind: MediaKind,
    rest: Option<&str>,
    usage: &str,
) -> anyhow::Result<()> {
    let http = &ctx.http;
    let Some(search) = rest else {
        let usage = usage_message(usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let first = ctx
        .anilist
        .search_media(kind, search, 1, ITEMS_PER_CHUNK)
        .await?;
    let total = first.page_info.total_items();

    if total == 0 || first.media.is_empty() {
        let out = no_results_message(kind.label(), search);
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let first_chunk = media_chunk_embeds(&first.media, 0, total)?;
    let fetcher = Arc::new(MediaSearchFetcher {
        anilist: Arc::clone(&ctx.anilist),
        kind,
        search: search.to_owned(),
        total,
    });

    start_lazy_search(
        &ctx,
        msg.channel_id,
        msg.author.id.get(),
        kind.label(),
        total,
        first_chunk,
        fetcher,
    )
    .await
}

/// Fetches one AniList result page and renders it as view pages.
struct MediaSearchFetcher {
    anilist: Arc<AniListClient>,
    kind: MediaKind,
    search: String,
    total: usize,
}

#[async_trait]
impl ChunkFetcher for MediaSearchFetcher {
    async fn fetch_chunk(&self, chunk_index: usize) -> anyhow::Result<Vec<Embed>> {
        let page = self
            .anilist
            .search_media(self.kind, &self.search, chunk_index + 1, ITEMS_PER_CHUNK)
            .await?;
        media_chunk_embeds(&page.media, chunk_index, self.total)
    }
}

fn media_chunk_embeds(
    items: &[Media],
    chunk_index: usize,
    total: usize,
) -> anyhow::Result<Vec<Embed>> {
    let start = chunk_index * ITEMS_PER_CHUNK;
    items
        .iter()
        .enumerate()
        .map(|(offset, media)| media_embed(media, start + offset + 1, total))
        .collect()
}
