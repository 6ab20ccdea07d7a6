use std::sync::Arc;

use async_trait::async_trait;
use twilight_model::{channel::message::embed::Embed, gateway::payload::incoming::MessageCreate};

use crate::CommandMeta;
use crate::search::embeds::{no_results_message, staff_embed};
use crate::search::{ITEMS_PER_CHUNK, start_lazy_search};
use crate::utility::embeds::usage_message;
use aika_anilist::AniListClient;
use aika_anilist::model::Staff;
use aika_core::Context;
use aika_utils::pagination::ChunkFetcher;

pub const META: CommandMeta = CommandMeta {
    name: "staff",
    desc: "Search AniList for staff (directors, voice actors, authors).",
    category: "search",
    usage: "!staff <name>",
};

/// Search staff and page through the results.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, rest: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let Some(search) = rest else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let first = ctx.anilist.search_staff(search, 1, ITEMS_PER_CHUNK).await?;
    let total = first.page_info.total_items();

    if total == 0 || first.staff.is_empty() {
        let out = no_results_message("staff", search);
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let first_chunk = staff_chunk_embeds(&first.staff, 0, total)?;
    let fetcher = Arc::new(StaffSearchFetcher {
        anilist: Arc::clone(&ctx.anilist),
        search: search.to_owned(),
        total,
    });

    start_lazy_search(
        &ctx,
        msg.channel_id,
        msg.author.id.get(),
        META.name,
        total,
        first_chunk,
        fetcher,
    )
    .await
}

struct StaffSearchFetcher {
    anilist: Arc<AniListClient>,
    search: String,
    total: usize,
}

#[async_trait]
impl ChunkFetcher for StaffSearchFetcher {
    async fn fetch_chunk(&self, chunk_index: usize) -> anyhow::Result<Vec<Embed>> {
        let page = self
            .anilist
            .search_staff(&self.search, chunk_index + 1, ITEMS_PER_CHUNK)
            .await?;
        staff_chunk_embeds(&page.staff, chunk_index, self.total)
    }
}

fn staff_chunk_embeds(
    items: &[Staff],
    chunk_index: usize,
    total: usize,
) -> anyhow::Result<Vec<Embed>> {
    let start = chunk_index * ITEMS_PER_CHUNK;
    items
        .iter()
        .enumerate()
        .map(|(offset, staff)| staff_embed(staff, start + offset + 1, total))
        .collect()
}
