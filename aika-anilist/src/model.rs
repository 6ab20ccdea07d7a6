//! Serde models for AniList GraphQL responses.

use serde::Deserialize;

/// Paging metadata returned with every `Page` query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: Option<usize>,
    pub current_page: Option<usize>,
    pub last_page: Option<usize>,
    #[serde(default)]
    pub has_next_page: bool,
    pub per_page: Option<usize>,
}

impl PageInfo {
    /// Total matching items, zero when the API omits the count.
    pub fn total_items(&self) -> usize {
        self.total.unwrap_or(0)
    }
}

/// Partial calendar date; any component may be unknown.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl FuzzyDate {
    /// Render the known components, most significant first.
    pub fn display(&self) -> Option<String> {
        let year = self.year?;
        match (self.month, self.day) {
            (Some(month), Some(day)) => Some(format!("{year:04}-{month:02}-{day:02}")),
            (Some(month), None) => Some(format!("{year:04}-{month:02}")),
            _ => Some(format!("{year:04}")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

impl MediaTitle {
    /// Best display title: english, then romaji, then native.
    pub fn preferred(&self) -> &str {
        self.english
            .as_deref()
            .or(self.romaji.as_deref())
            .or(self.native.as_deref())
            .unwrap_or("Untitled")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    pub large: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudioNode {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudioConnection {
    #[serde(default)]
    pub nodes: Vec<StudioNode>,
}

/// One anime or manga entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: u64,
    pub site_url: String,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub format: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub title: MediaTitle,
    pub start_date: Option<FuzzyDate>,
    pub end_date: Option<FuzzyDate>,
    pub season: Option<String>,
    pub season_year: Option<i32>,
    pub episodes: Option<u32>,
    pub chapters: Option<u32>,
    pub volumes: Option<u32>,
    pub cover_image: Option<CoverImage>,
    pub banner_image: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub average_score: Option<u32>,
    pub mean_score: Option<u32>,
    #[serde(default)]
    pub is_adult: bool,
    #[serde(default)]
    pub studios: StudioConnection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonName {
    pub full: Option<String>,
    pub native: Option<String>,
}

impl PersonName {
    pub fn preferred(&self) -> &str {
        self.full
            .as_deref()
            .or(self.native.as_deref())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonImage {
    pub large: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaNode {
    pub site_url: String,
    pub format: Option<String>,
    #[serde(default)]
    pub title: MediaTitle,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaConnection {
    #[serde(default)]
    pub nodes: Vec<MediaNode>,
}

/// One character entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: u64,
    pub site_url: String,
    pub description: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    #[serde(default)]
    pub name: PersonName,
    pub image: Option<PersonImage>,
    pub date_of_birth: Option<FuzzyDate>,
    #[serde(default)]
    pub media: MediaConnection,
}

/// One staff entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: u64,
    pub site_url: String,
    pub description: Option<String>,
    pub language_v2: Option<String>,
    #[serde(default)]
    pub primary_occupations: Vec<String>,
    #[serde(default)]
    pub name: PersonName,
    pub image: Option<PersonImage>,
    pub date_of_birth: Option<FuzzyDate>,
    #[serde(default)]
    pub staff_media: MediaConnection,
}

/// One studio entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Studio {
    pub id: u64,
    pub site_url: String,
    pub name: String,
    #[serde(default)]
    pub is_animation_studio: bool,
    pub favourites: Option<u32>,
    #[serde(default)]
    pub media: MediaConnection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserAvatar {
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnimeStats {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub minutes_watched: u64,
    #[serde(default)]
    pub episodes_watched: u64,
    pub mean_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMangaStats {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub chapters_read: u64,
    #[serde(default)]
    pub volumes_read: u64,
    pub mean_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserStatistics {
    #[serde(default)]
    pub anime: UserAnimeStats,
    #[serde(default)]
    pub manga: UserMangaStats,
}

/// One AniList user profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub site_url: String,
    pub name: String,
    pub about: Option<String>,
    pub created_at: Option<i64>,
    pub avatar: Option<UserAvatar>,
    #[serde(default)]
    pub statistics: UserStatistics,
}

/// `Page` payload of a media search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPage {
    pub page_info: PageInfo,
    #[serde(default)]
    pub media: Vec<Media>,
}

/// `Page` payload of a character search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPage {
    pub page_info: PageInfo,
    #[serde(default)]
    pub characters: Vec<Character>,
}

/// `Page` payload of a staff search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPage {
    pub page_info: PageInfo,
    #[serde(default)]
    pub staff: Vec<Staff>,
}

/// `Page` payload of a studio search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioPage {
    pub page_info: PageInfo,
    #[serde(default)]
    pub studios: Vec<Studio>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_page_deserializes_from_api_shape() {
        let raw = serde_json::json!({
            "pageInfo": {
                "total": 128, "currentPage": 2, "lastPage": 26,
                "hasNextPage": true, "perPage": 5
            },
            "media": [{
                "id": 21,
                "siteUrl": "https://anilist.co/anime/21",
                "type": "ANIME",
                "format": "TV",
                "status": "RELEASING",
                "description": "Gol D. Roger was known as the <i>Pirate King</i>.",
                "title": { "romaji": "One Piece", "english": "One Piece", "native": null },
                "startDate": { "year": 1999, "month": 10, "day": 20 },
                "endDate": { "year": null, "month": null, "day": null },
                "season": "FALL",
                "seasonYear": 1999,
                "episodes": null,
                "chapters": null,
                "volumes": null,
                "coverImage": { "large": "https://img.example/one-piece.jpg", "color": "#e4a15d" },
                "bannerImage": null,
                "genres": ["Action", "Adventure"],
                "averageScore": 88,
                "meanScore": 88,
                "isAdult": false,
                "studios": { "nodes": [{ "name": "Toei Animation" }] }
            }]
        });

        let page: MediaPage = serde_json::from_value(raw).unwrap();
        assert_eq!(page.page_info.total_items(), 128);
        assert!(page.page_info.has_next_page);

        let media = &page.media[0];
        assert_eq!(media.title.preferred(), "One Piece");
        assert_eq!(media.start_date.unwrap().display().as_deref(), Some("1999-10-20"));
        assert!(media.end_date.unwrap().display().is_none());
        assert_eq!(media.studios.nodes[0].name, "Toei Animation");
        assert_eq!(media.genres.len(), 2);
    }

    #[test]
    fn sparse_media_entries_deserialize_with_defaults() {
        let raw = serde_json::json!({
            "pageInfo": { "total": 1 },
            "media": [{ "id": 1, "siteUrl": "https://anilist.co/anime/1" }]
        });

        let page: MediaPage = serde_json::from_value(raw).unwrap();
        let media = &page.media[0];
        assert_eq!(media.title.preferred(), "Untitled");
        assert!(media.genres.is_empty());
        assert!(!media.is_adult);
    }

    #[test]
    fn fuzzy_date_renders_known_components_only() {
        let full = FuzzyDate { year: Some(2021), month: Some(4), day: Some(3) };
        assert_eq!(full.display().as_deref(), Some("2021-04-03"));

        let month_only = FuzzyDate { year: Some(2021), month: Some(4), day: None };
        assert_eq!(month_only.display().as_deref(), Some("2021-04"));

        let year_only = FuzzyDate { year: Some(2021), month: None, day: Some(3) };
        assert_eq!(year_only.display().as_deref(), Some("2021"));

        assert!(FuzzyDate::default().display().is_none());
    }

    #[test]
    fn user_profile_deserializes_from_api_shape() {
        let raw = serde_json::json!({
            "id": 5, "siteUrl": "https://anilist.co/user/5", "name": "aika",
            "about": null, "createdAt": 1_500_000_000,
            "avatar": { "large": "https://img.example/a.png" },
            "statistics": {
                "anime": { "count": 250, "minutesWatched": 120000, "episodesWatched": 4800, "meanScore": 74.5 },
                "manga": { "count": 30, "chaptersRead": 2100, "volumesRead": 190, "meanScore": null }
            }
        });

        let user: User = serde_json::from_value(raw).unwrap();
        assert_eq!(user.statistics.anime.count, 250);
        assert!(user.statistics.manga.mean_score.is_none());
    }
}
