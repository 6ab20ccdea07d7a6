use std::sync::{Arc, Mutex};

use twilight_http::Client;

use aika_anilist::AniListClient;
use aika_database::Database;
use aika_utils::cache::TtlCache;
use aika_utils::pagination::{CleanupScheduler, PagerSessions};

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub db: Database,
    pub anilist: Arc<AniListClient>,
    pub cleanup: Arc<CleanupScheduler>,
    pub sessions: Arc<PagerSessions>,
    pub prefixes: Arc<Mutex<TtlCache<u64, String>>>,
}

impl Context {
    /// Create a new application context.
    pub fn new(
        http: Arc<Client>,
        db: Database,
        anilist: Arc<AniListClient>,
        cleanup: Arc<CleanupScheduler>,
        sessions: Arc<PagerSessions>,
        prefixes: TtlCache<u64, String>,
    ) -> Self {
        Self {
            http,
            db,
            anilist,
            cleanup,
            sessions,
            prefixes: Arc::new(Mutex::new(prefixes)),
        }
    }
}
