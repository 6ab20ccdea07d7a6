//! Lazy chunked variant of the paginated view.
//!
//! A lazy view knows its total page count up front but materializes pages in
//! chunks, fetching a chunk through an injected fetcher only when the cursor
//! first crosses into it. Fetched chunks are cached for the session's
//! lifetime; fetch failures propagate to the caller unchanged, and a failed
//! fetch leaves the cursor where it was.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use twilight_model::channel::message::embed::Embed;

use super::pager::Pager;
use crate::cache::Clock;

/// Source of page chunks for a lazy session.
///
/// `chunk_index` is zero-based; chunk `i` covers page indices
/// `[i * chunk_size, (i + 1) * chunk_size)`, short on the final chunk.
#[async_trait]
pub trait ChunkFetcher: Send + Sync {
    /// Fetch all pages of one chunk, in page order.
    async fn fetch_chunk(&self, chunk_index: usize) -> anyhow::Result<Vec<Embed>>;
}

/// One live lazily-populated paginated view, keyed by its message.
pub struct LazySession {
    command: String,
    pager: Pager,
    chunk_size: usize,
    fetcher: Arc<dyn ChunkFetcher>,
    chunks: HashMap<usize, Vec<Embed>>,
    expires_at: u64,
    timeout_secs: u64,
}

impl LazySession {
    /// Create a session over `total_pages` pages fetched `chunk_size` at a
    /// time. `timeout_secs` bounds how long the session may sit idle.
    pub fn new(
        command: impl Into<String>,
        owner_id: u64,
        total_pages: usize,
        chunk_size: usize,
        fetcher: Arc<dyn ChunkFetcher>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            command: command.into(),
            pager: Pager::new(total_pages, Some(owner_id)),
            chunk_size: chunk_size.max(1),
            fetcher,
            chunks: HashMap::new(),
            expires_at: 0,
            timeout_secs,
        }
    }

    /// Pre-populate a chunk the caller already fetched (the first chunk of a
    /// search is materialized eagerly to learn the total count).
    pub fn seed_chunk(&mut self, chunk_index: usize, pages: Vec<Embed>) {
        self.chunks.insert(chunk_index, pages);
    }

    /// Command this session renders for.
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// Registry of live lazy sessions, bounded by capacity and idle expiry.
///
/// Sessions are keyed by message ID. Expired sessions are swept on insert,
/// and the soonest-to-expire session is evicted when the registry is full, so
/// total chunk-cache memory stays bounded even though a single session's
/// chunk cache never evicts.
pub struct PagerSessions {
    capacity: usize,
    clock: Arc<dyn Clock>,
    sessions: tokio::sync::Mutex<HashMap<u64, LazySession>>,
}

impl PagerSessions {
    /// Create a registry bounded to `capacity` live sessions.
    pub fn new(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            capacity: capacity.max(1),
            clock,
            sessions: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Register the session backing a just-sent paginated message.
    pub async fn insert(&self, message_id: u64, mut session: LazySession) {
        let now = self.clock.now_unix_secs();
        session.expires_at = now.saturating_add(session.timeout_secs);

        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, live| live.expires_at > now);

        if sessions.len() >= self.capacity && !sessions.contains_key(&message_id) {
            let evict_key = sessions
                .iter()
                .min_by_key(|(_, live)| live.expires_at)
                .map(|(key, _)| *key);
            if let Some(evict_key) = evict_key {
                sessions.remove(&evict_key);
            }
        }

        sessions.insert(message_id, session);
    }

    /// Drop a session (message deleted or view closed).
    pub async fn remove(&self, message_id: u64) {
        self.sessions.lock().await.remove(&message_id);
    }

    /// Snapshot the pager state of a live session.
    pub async fn pager(&self, message_id: u64) -> Option<Pager> {
        let now = self.clock.now_unix_secs();
        let sessions = self.sessions.lock().await;
        sessions
            .get(&message_id)
            .filter(|session| session.expires_at > now)
            .map(|session| session.pager.clone())
    }

    /// Materialize and return the page at `index`, moving the session cursor
    /// onto it.
    ///
    /// Returns `Ok(None)` when no live session exists for the message (the
    /// view is inert). A chunk fetch error is returned unchanged and leaves
    /// both the cursor and the chunk cache untouched. The fetch itself runs
    /// outside the registry lock; if two navigations race into the same
    /// uncached chunk both fetch, and the second cache write overwrites the
    /// first with equal data.
    pub async fn page(&self, message_id: u64, index: usize) -> anyhow::Result<Option<Embed>> {
        let now = self.clock.now_unix_secs();

        let (fetcher, chunk_index, offset) = {
            let mut sessions = self.sessions.lock().await;
            let Some(session) = sessions
                .get_mut(&message_id)
                .filter(|session| session.expires_at > now)
            else {
                return Ok(None);
            };

            let chunk_index = index / session.chunk_size;
            let offset = index % session.chunk_size;

            if let Some(chunk) = session.chunks.get(&chunk_index) {
                let page = chunk
                    .get(offset)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("page {index} missing from cached chunk"))?;
                Self::commit_navigation(session, index, now);
                return Ok(Some(page));
            }

            (Arc::clone(&session.fetcher), chunk_index, offset)
        };

        let pages = fetcher.fetch_chunk(chunk_index).await?;
        let page = pages
            .get(offset)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("page {index} missing from fetched chunk"))?;

        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(&message_id) {
            session.chunks.insert(chunk_index, pages);
            Self::commit_navigation(session, index, now);
        }

        Ok(Some(page))
    }

    fn commit_navigation(session: &mut LazySession, index: usize, now: u64) {
        session.pager.seek(index);
        session.expires_at = now.saturating_add(session.timeout_secs);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use twilight_util::builder::embed::EmbedBuilder;

    use super::*;
    use crate::cache::test_support::ManualClock;

    struct CountingFetcher {
        total_pages: usize,
        chunk_size: usize,
        calls: AtomicUsize,
        last_chunk: AtomicUsize,
    }

    impl CountingFetcher {
        fn new(total_pages: usize, chunk_size: usize) -> Self {
            Self {
                total_pages,
                chunk_size,
                calls: AtomicUsize::new(0),
                last_chunk: AtomicUsize::new(usize::MAX),
            }
        }
    }

    #[async_trait]
    impl ChunkFetcher for CountingFetcher {
        async fn fetch_chunk(&self, chunk_index: usize) -> anyhow::Result<Vec<Embed>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_chunk.store(chunk_index, Ordering::SeqCst);

            let start = chunk_index * self.chunk_size;
            let end = (start + self.chunk_size).min(self.total_pages);
            Ok((start..end).map(|index| page_embed(index)).collect())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl ChunkFetcher for FailingFetcher {
        async fn fetch_chunk(&self, _chunk_index: usize) -> anyhow::Result<Vec<Embed>> {
            anyhow::bail!("upstream unavailable")
        }
    }

    fn page_embed(index: usize) -> Embed {
        EmbedBuilder::new()
            .description(format!("page {index}"))
            .build()
    }

    fn registry() -> (PagerSessions, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (PagerSessions::new(8, Arc::clone(&clock) as _), clock)
    }

    #[tokio::test]
    async fn crossing_into_a_chunk_fetches_it_exactly_once() {
        let (sessions, _clock) = registry();
        let fetcher = Arc::new(CountingFetcher::new(12, 5));
        let session = LazySession::new("anime", 1, 12, 5, Arc::clone(&fetcher) as _, 300);
        sessions.insert(100, session).await;

        let page = sessions.page(100, 6).await.unwrap().unwrap();
        assert_eq!(page.description.as_deref(), Some("page 6"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fetcher.last_chunk.load(Ordering::SeqCst), 1);

        let page = sessions.page(100, 7).await.unwrap().unwrap();
        assert_eq!(page.description.as_deref(), Some("page 7"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1, "chunk refetched");

        assert_eq!(sessions.pager(100).await.unwrap().cursor(), 7);
    }

    #[tokio::test]
    async fn seeded_first_chunk_serves_without_fetching() {
        let (sessions, _clock) = registry();
        let fetcher = Arc::new(CountingFetcher::new(12, 5));
        let mut session = LazySession::new("anime", 1, 12, 5, Arc::clone(&fetcher) as _, 300);
        session.seed_chunk(0, (0..5).map(page_embed).collect());
        sessions.insert(100, session).await;

        let page = sessions.page(100, 2).await.unwrap().unwrap();
        assert_eq!(page.description.as_deref(), Some("page 2"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_failures_propagate_and_leave_the_cursor_alone() {
        let (sessions, _clock) = registry();
        let session = LazySession::new("anime", 1, 12, 5, Arc::new(FailingFetcher) as _, 300);
        sessions.insert(100, session).await;

        let err = sessions.page(100, 6).await.unwrap_err();
        assert!(err.to_string().contains("upstream unavailable"));
        assert_eq!(sessions.pager(100).await.unwrap().cursor(), 0);
    }

    #[tokio::test]
    async fn unknown_and_expired_sessions_are_inert() {
        let (sessions, clock) = registry();
        assert!(sessions.page(999, 0).await.unwrap().is_none());

        let fetcher = Arc::new(CountingFetcher::new(12, 5));
        let session = LazySession::new("anime", 1, 12, 5, Arc::clone(&fetcher) as _, 300);
        sessions.insert(100, session).await;

        clock.advance(301);
        assert!(sessions.page(100, 1).await.unwrap().is_none());
        assert!(sessions.pager(100).await.is_none());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_navigation_extends_the_session_lifetime() {
        let (sessions, clock) = registry();
        let fetcher = Arc::new(CountingFetcher::new(12, 5));
        let session = LazySession::new("anime", 1, 12, 5, Arc::clone(&fetcher) as _, 300);
        sessions.insert(100, session).await;

        clock.advance(200);
        assert!(sessions.page(100, 1).await.unwrap().is_some());

        clock.advance(200);
        assert!(
            sessions.page(100, 2).await.unwrap().is_some(),
            "session expired despite recent navigation"
        );
    }

    #[tokio::test]
    async fn full_registry_evicts_the_stalest_session() {
        let clock = Arc::new(ManualClock::default());
        let sessions = PagerSessions::new(2, Arc::clone(&clock) as _);

        for message_id in [1_u64, 2, 3] {
            let fetcher = Arc::new(CountingFetcher::new(4, 2));
            sessions
                .insert(message_id, LazySession::new("anime", 1, 4, 2, fetcher as _, 300))
                .await;
            clock.advance(1);
        }

        assert!(sessions.pager(1).await.is_none());
        assert!(sessions.pager(2).await.is_some());
        assert!(sessions.pager(3).await.is_some());
    }
}
