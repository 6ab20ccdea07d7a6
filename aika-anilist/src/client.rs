//! AniList GraphQL client.
//!
//! One POST per query against the public endpoint. Repeated searches are
//! served from a TTL-bounded response cache handed in at construction;
//! random lookups bypass it. Failures surface as-is with context; the
//! client never retries.

use std::time::Duration;

use anyhow::Context as _;
use rand::Rng as _;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use aika_utils::cache::TtlCache;

use crate::model::{CharacterPage, Media, MediaPage, StaffPage, StudioPage, User};
use crate::query;

/// Public AniList GraphQL endpoint.
pub const ANILIST_ENDPOINT: &str = "https://graphql.anilist.co";

const REQUEST_TIMEOUT_SECS: u64 = 20;

// AniList refuses page offsets past its browse depth; keep random picks inside it.
const RANDOM_POOL_LIMIT: usize = 5_000;

/// Which media catalog a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Anime,
    Manga,
}

impl MediaKind {
    /// GraphQL `MediaType` value.
    pub fn as_graphql(self) -> &'static str {
        match self {
            Self::Anime => "ANIME",
            Self::Manga => "MANGA",
        }
    }

    /// Lowercase label for messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    status: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

/// Client for the AniList GraphQL API.
pub struct AniListClient {
    http: reqwest::Client,
    endpoint: String,
    cache: tokio::sync::Mutex<TtlCache<String, Value>>,
}

impl AniListClient {
    /// Create a client for `endpoint` with the given response cache.
    pub fn new(
        endpoint: impl Into<String>,
        cache: TtlCache<String, Value>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("aika/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build AniList HTTP client")?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            cache: tokio::sync::Mutex::new(cache),
        })
    }

    /// Search anime or manga by title.
    pub async fn search_media(
        &self,
        kind: MediaKind,
        search: &str,
        page: usize,
        per_page: usize,
    ) -> anyhow::Result<MediaPage> {
        let variables = json!({
            "search": search,
            "type": kind.as_graphql(),
            "page": page,
            "perPage": per_page,
        });
        let key = format!("media:{}:{search}:{page}:{per_page}", kind.as_graphql());

        let data = self
            .cached_execute(&key, query::MEDIA_SEARCH, variables)
            .await?
            .context("AniList returned no data for a media search")?;

        page_payload(data)
    }

    /// Search characters by name.
    pub async fn search_characters(
        &self,
        search: &str,
        page: usize,
        per_page: usize,
    ) -> anyhow::Result<CharacterPage> {
        let variables = json!({ "search": search, "page": page, "perPage": per_page });
        let key = format!("character:{search}:{page}:{per_page}");

        let data = self
            .cached_execute(&key, query::CHARACTER_SEARCH, variables)
            .await?
            .context("AniList returned no data for a character search")?;

        page_payload(data)
    }

    /// Search staff by name.
    pub async fn search_staff(
        &self,
        search: &str,
        page: usize,
        per_page: usize,
    ) -> anyhow::Result<StaffPage> {
        let variables = json!({ "search": search, "page": page, "perPage": per_page });
        let key = format!("staff:{search}:{page}:{per_page}");

        let data = self
            .cached_execute(&key, query::STAFF_SEARCH, variables)
            .await?
            .context("AniList returned no data for a staff search")?;

        page_payload(data)
    }

    /// Search studios by name.
    pub async fn search_studios(
        &self,
        search: &str,
        page: usize,
        per_page: usize,
    ) -> anyhow::Result<StudioPage> {
        let variables = json!({ "search": search, "page": page, "perPage": per_page });
        let key = format!("studio:{search}:{page}:{per_page}");

        let data = self
            .cached_execute(&key, query::STUDIO_SEARCH, variables)
            .await?
            .context("AniList returned no data for a studio search")?;

        page_payload(data)
    }

    /// Look up a user profile by name. `Ok(None)` when the name is unknown.
    pub async fn find_user(&self, name: &str) -> anyhow::Result<Option<User>> {
        let variables = json!({ "name": name });

        let Some(mut data) = self.execute(query::USER_LOOKUP, variables).await? else {
            return Ok(None);
        };

        let user_value = data
            .get_mut("User")
            .map(Value::take)
            .unwrap_or(Value::Null);
        if user_value.is_null() {
            return Ok(None);
        }

        let user =
            serde_json::from_value(user_value).context("malformed AniList user payload")?;
        Ok(Some(user))
    }

    /// Pick a uniformly random entry from the popularity-ordered catalog.
    pub async fn random_media(&self, kind: MediaKind) -> anyhow::Result<Option<Media>> {
        let count_variables = json!({ "type": kind.as_graphql(), "page": 1, "perPage": 1 });
        let count_key = format!("media-count:{}", kind.as_graphql());

        let data = self
            .cached_execute(&count_key, query::MEDIA_BROWSE, count_variables)
            .await?
            .context("AniList returned no data for a media count")?;
        let first: MediaPage = page_payload(data)?;

        let pool = first.page_info.total_items().min(RANDOM_POOL_LIMIT);
        if pool == 0 {
            return Ok(None);
        }

        let offset = rand::thread_rng().gen_range(0..pool);
        let pick_variables = json!({
            "type": kind.as_graphql(),
            "page": offset + 1,
            "perPage": 1,
        });

        let data = self
            .execute(query::MEDIA_BROWSE, pick_variables)
            .await?
            .context("AniList returned no data for a random pick")?;
        let picked: MediaPage = page_payload(data)?;

        Ok(picked.media.into_iter().next())
    }

    async fn cached_execute(
        &self,
        cache_key: &str,
        query: &'static str,
        variables: Value,
    ) -> anyhow::Result<Option<Value>> {
        {
            let mut cache = self.cache.lock().await;
            if let Some(hit) = cache.get(&cache_key.to_owned()) {
                return Ok(Some(hit));
            }
        }

        let data = self.execute(query, variables).await?;

        if let Some(data) = data.as_ref() {
            let mut cache = self.cache.lock().await;
            cache.insert(cache_key.to_owned(), data.clone());
        }

        Ok(data)
    }

    /// Execute one GraphQL request. `Ok(None)` maps the API's not-found
    /// error; every other GraphQL error fails the call.
    async fn execute(&self, query: &'static str, variables: Value) -> anyhow::Result<Option<Value>> {
        let body = json!({ "query": query, "variables": variables });

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("AniList request failed")?;

        let envelope: Envelope = response
            .json()
            .await
            .context("AniList response was not valid JSON")?;

        if envelope.errors.iter().any(|error| error.status == Some(404)) {
            return Ok(None);
        }

        if let Some(error) = envelope.errors.first() {
            anyhow::bail!("AniList error: {}", error.message);
        }

        envelope
            .data
            .map(Some)
            .context("AniList response carried neither data nor errors")
    }
}

fn page_payload<T: DeserializeOwned>(mut data: Value) -> anyhow::Result<T> {
    let page = data
        .get_mut("Page")
        .map(Value::take)
        .context("AniList response missing Page payload")?;
    serde_json::from_value(page).context("malformed AniList page payload")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_maps_to_graphql_values() {
        assert_eq!(MediaKind::Anime.as_graphql(), "ANIME");
        assert_eq!(MediaKind::Manga.as_graphql(), "MANGA");
    }

    #[test]
    fn envelope_not_found_is_distinguished_from_failure() {
        let not_found: Envelope = serde_json::from_value(serde_json::json!({
            "data": { "User": null },
            "errors": [{ "message": "Not Found.", "status": 404 }]
        }))
        .unwrap();
        assert!(not_found.errors.iter().any(|e| e.status == Some(404)));

        let rate_limited: Envelope = serde_json::from_value(serde_json::json!({
            "data": null,
            "errors": [{ "message": "Too Many Requests.", "status": 429 }]
        }))
        .unwrap();
        assert!(!rate_limited.errors.iter().any(|e| e.status == Some(404)));
        assert_eq!(rate_limited.errors[0].message, "Too Many Requests.");
    }

    #[test]
    fn page_payload_extracts_the_page_object() {
        let data = serde_json::json!({
            "Page": { "pageInfo": { "total": 3 }, "media": [] }
        });
        let page: MediaPage = page_payload(data).unwrap();
        assert_eq!(page.page_info.total_items(), 3);
    }
}
