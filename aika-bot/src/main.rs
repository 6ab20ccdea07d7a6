use std::env;
use std::sync::Arc;

use tracing::{error, info};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use aika_anilist::{ANILIST_ENDPOINT, AniListClient};
use aika_commands::{handle_interaction, handle_message};
use aika_core::Context;
use aika_database::Database;
use aika_utils::cache::{SystemClock, TtlCache};
use aika_utils::pagination::{CleanupScheduler, PagerSessions};

const ANILIST_CACHE_CAPACITY: usize = 256;
const ANILIST_CACHE_TTL_SECS: u64 = 300;
const PREFIX_CACHE_CAPACITY: usize = 1_024;
const PREFIX_CACHE_TTL_SECS: u64 = 600;
const PAGER_SESSION_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let database_url = env::var("DATABASE_URL")?;

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(token.clone()));
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    aika_database::MIGRATOR.run(&db_pool).await?;
    info!("PostgreSQL connection established.");
    let db = Database::new(db_pool);

    let clock = Arc::new(SystemClock);
    let anilist = Arc::new(AniListClient::new(
        ANILIST_ENDPOINT,
        TtlCache::new(
            ANILIST_CACHE_CAPACITY,
            ANILIST_CACHE_TTL_SECS,
            Arc::clone(&clock) as _,
        ),
    )?);
    let cleanup = Arc::new(CleanupScheduler::new());
    let sessions = Arc::new(PagerSessions::new(
        PAGER_SESSION_CAPACITY,
        Arc::clone(&clock) as _,
    ));
    let prefixes = TtlCache::new(
        PREFIX_CACHE_CAPACITY,
        PREFIX_CACHE_TTL_SECS,
        Arc::clone(&clock) as _,
    );

    let ctx = Context::new(Arc::clone(&http), db, anilist, cleanup, sessions, prefixes);

    // Declare which intents the bot has
    let intents = Intents::GUILDS
        | Intents::GUILD_MESSAGES
        | Intents::DIRECT_MESSAGES
        | Intents::MESSAGE_CONTENT;

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::new(0, 1), token, intents);

    info!("Aika is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("Aika has successfully awoken!");
            }

            Event::MessageCreate(msg) => {
                if let Err(source) = handle_message(ctx.clone(), msg).await {
                    error!(?source, "message command failed");
                }
            }
            Event::InteractionCreate(interaction) => {
                if let Err(source) = handle_interaction(ctx.clone(), interaction).await {
                    error!(?source, "interaction handler failed");
                }
            }
            _ => {} // Ignore unused events
        }
    }
    Ok(()) // Return Success, shutdown cleanly
}
