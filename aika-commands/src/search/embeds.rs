//! Embed templates for AniList search results.
//!
//! These are pure view helpers; they never perform HTTP requests.

use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{
    EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder, ImageSource,
};

use aika_anilist::model::{Character, Media, MediaNode, Staff, Studio, User};
use aika_utils::embed::{DEFAULT_EMBED_COLOR, page_footer};
use aika_utils::parse::{clean_description, sanitize_mentions, truncate_chars};

const DESCRIPTION_CHARS: usize = 400;
const ABOUT_CHARS: usize = 300;

/// Render one media result as a page of a paginated view.
pub fn media_embed(media: &Media, page: usize, total_pages: usize) -> anyhow::Result<Embed> {
    let title = if media.is_adult {
        format!("🔞 {}", media.title.preferred())
    } else {
        media.title.preferred().to_owned()
    };

    let description = media
        .description
        .as_deref()
        .map(|raw| clean_description(raw, DESCRIPTION_CHARS))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "No synopsis available.".to_owned());

    let mut builder = EmbedBuilder::new()
        .title(truncate_chars(&title, 256))
        .url(&media.site_url)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    if let Some(url) = media
        .cover_image
        .as_ref()
        .and_then(|cover| cover.large.as_deref())
    {
        builder = builder.thumbnail(ImageSource::url(url.to_owned())?);
    }

    if let Some(format) = media.format.as_deref() {
        builder = builder.field(EmbedFieldBuilder::new("Format", display_enum(format)).inline());
    }

    if let Some(status) = media.status.as_deref() {
        builder = builder.field(EmbedFieldBuilder::new("Status", display_enum(status)).inline());
    }

    if let Some(episodes) = media.episodes {
        builder = builder.field(EmbedFieldBuilder::new("Episodes", episodes.to_string()).inline());
    }

    if let Some(chapters) = media.chapters {
        builder = builder.field(EmbedFieldBuilder::new("Chapters", chapters.to_string()).inline());
    }

    if let Some(volumes) = media.volumes {
        builder = builder.field(EmbedFieldBuilder::new("Volumes", volumes.to_string()).inline());
    }

    if let Some(score) = media.average_score.or(media.mean_score) {
        builder = builder.field(EmbedFieldBuilder::new("Score", format!("{score}%")).inline());
    }

    if let Some(range) = date_range(media) {
        let label = if media.media_type.as_deref() == Some("MANGA") {
            "Published"
        } else {
            "Aired"
        };
        builder = builder.field(EmbedFieldBuilder::new(label, range).inline());
    }

    let studios: Vec<&str> = media
        .studios
        .nodes
        .iter()
        .map(|studio| studio.name.as_str())
        .collect();
    if !studios.is_empty() {
        builder = builder.field(EmbedFieldBuilder::new("Studio", studios.join(", ")).inline());
    }

    if !media.genres.is_empty() {
        builder = builder.field(EmbedFieldBuilder::new("Genres", media.genres.join(", ")));
    }

    if total_pages > 1 {
        builder = builder.footer(EmbedFooterBuilder::new(page_footer(page, total_pages)));
    }

    Ok(builder.validate()?.build())
}

/// Render one character result as a page of a paginated view.
pub fn character_embed(
    character: &Character,
    page: usize,
    total_pages: usize,
) -> anyhow::Result<Embed> {
    let description = character
        .description
        .as_deref()
        .map(|raw| clean_description(raw, DESCRIPTION_CHARS))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "No biography available.".to_owned());

    let mut builder = EmbedBuilder::new()
        .title(truncate_chars(character.name.preferred(), 256))
        .url(&character.site_url)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    if let Some(url) = character
        .image
        .as_ref()
        .and_then(|image| image.large.as_deref())
    {
        builder = builder.thumbnail(ImageSource::url(url.to_owned())?);
    }

    if let Some(native) = character.name.native.as_deref() {
        builder = builder.field(EmbedFieldBuilder::new("Native", native).inline());
    }

    if let Some(gender) = character.gender.as_deref() {
        builder = builder.field(EmbedFieldBuilder::new("Gender", gender).inline());
    }

    if let Some(age) = character.age.as_deref() {
        builder = builder.field(EmbedFieldBuilder::new("Age", age).inline());
    }

    if let Some(birthday) = character.date_of_birth.as_ref().and_then(|date| date.display()) {
        builder = builder.field(EmbedFieldBuilder::new("Birthday", birthday).inline());
    }

    if let Some(appearances) = media_links(&character.media.nodes) {
        builder = builder.field(EmbedFieldBuilder::new("Appears In", appearances));
    }

    if total_pages > 1 {
        builder = builder.footer(EmbedFooterBuilder::new(page_footer(page, total_pages)));
    }

    Ok(builder.validate()?.build())
}

/// Render one staff result as a page of a paginated view.
pub fn staff_embed(staff: &Staff, page: usize, total_pages: usize) -> anyhow::Result<Embed> {
    let description = staff
        .description
        .as_deref()
        .map(|raw| clean_description(raw, DESCRIPTION_CHARS))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "No biography available.".to_owned());

    let mut builder = EmbedBuilder::new()
        .title(truncate_chars(staff.name.preferred(), 256))
        .url(&staff.site_url)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    if let Some(url) = staff.image.as_ref().and_then(|image| image.large.as_deref()) {
        builder = builder.thumbnail(ImageSource::url(url.to_owned())?);
    }

    if let Some(language) = staff.language_v2.as_deref() {
        builder = builder.field(EmbedFieldBuilder::new("Language", language).inline());
    }

    if !staff.primary_occupations.is_empty() {
        builder = builder.field(
            EmbedFieldBuilder::new("Occupations", staff.primary_occupations.join(", ")).inline(),
        );
    }

    if let Some(birthday) = staff.date_of_birth.as_ref().and_then(|date| date.display()) {
        builder = builder.field(EmbedFieldBuilder::new("Birthday", birthday).inline());
    }

    if let Some(works) = media_links(&staff.staff_media.nodes) {
        builder = builder.field(EmbedFieldBuilder::new("Known For", works));
    }

    if total_pages > 1 {
        builder = builder.footer(EmbedFooterBuilder::new(page_footer(page, total_pages)));
    }

    Ok(builder.validate()?.build())
}

/// Render one studio result as a page of a paginated view.
pub fn studio_embed(studio: &Studio, page: usize, total_pages: usize) -> anyhow::Result<Embed> {
    let mut builder = EmbedBuilder::new()
        .title(truncate_chars(&studio.name, 256))
        .url(&studio.site_url)
        .color(DEFAULT_EMBED_COLOR);

    builder = builder.field(
        EmbedFieldBuilder::new(
            "Animation Studio",
            if studio.is_animation_studio { "Yes" } else { "No" },
        )
        .inline(),
    );

    if let Some(favourites) = studio.favourites {
        builder = builder.field(EmbedFieldBuilder::new("Favorites", favourites.to_string()).inline());
    }

    if let Some(works) = media_links(&studio.media.nodes) {
        builder = builder.field(EmbedFieldBuilder::new("Notable Works", works));
    }

    if total_pages > 1 {
        builder = builder.footer(EmbedFooterBuilder::new(page_footer(page, total_pages)));
    }

    Ok(builder.validate()?.build())
}

/// Render an AniList user profile.
pub fn user_embed(user: &User) -> anyhow::Result<Embed> {
    let about = user
        .about
        .as_deref()
        .map(|raw| sanitize_mentions(&clean_description(raw, ABOUT_CHARS)))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "No bio set.".to_owned());

    let mut builder = EmbedBuilder::new()
        .title(truncate_chars(&user.name, 256))
        .url(&user.site_url)
        .color(DEFAULT_EMBED_COLOR)
        .description(about);

    if let Some(url) = user.avatar.as_ref().and_then(|avatar| avatar.large.as_deref()) {
        builder = builder.thumbnail(ImageSource::url(url.to_owned())?);
    }

    let anime = &user.statistics.anime;
    let anime_days = anime.minutes_watched / (60 * 24);
    let anime_stats = format!(
        "Entries: {}\nEpisodes: {}\nDays watched: {}\nMean score: {}",
        anime.count,
        anime.episodes_watched,
        anime_days,
        mean_score_display(anime.mean_score),
    );
    builder = builder.field(EmbedFieldBuilder::new("Anime", anime_stats).inline());

    let manga = &user.statistics.manga;
    let manga_stats = format!(
        "Entries: {}\nChapters: {}\nVolumes: {}\nMean score: {}",
        manga.count,
        manga.chapters_read,
        manga.volumes_read,
        mean_score_display(manga.mean_score),
    );
    builder = builder.field(EmbedFieldBuilder::new("Manga", manga_stats).inline());

    if let Some(joined) = user.created_at {
        builder = builder.field(EmbedFieldBuilder::new("Joined", format!("<t:{joined}:D>")).inline());
    }

    Ok(builder.validate()?.build())
}

/// Short no-results notice for a search command.
pub fn no_results_message(what: &str, query: &str) -> String {
    format!("No {what} found for `{}`.", sanitize_mentions(query))
}

fn mean_score_display(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{score:.1}"),
        None => "N/A".to_owned(),
    }
}

fn date_range(media: &Media) -> Option<String> {
    let start = media.start_date.as_ref().and_then(|date| date.display());
    let end = media.end_date.as_ref().and_then(|date| date.display());

    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start} → {end}")),
        (Some(start), None) => Some(format!("{start} → ongoing")),
        _ => None,
    }
}

fn media_links(nodes: &[MediaNode]) -> Option<String> {
    if nodes.is_empty() {
        return None;
    }

    let lines: Vec<String> = nodes
        .iter()
        .map(|node| format!("[{}]({})", node.title.preferred(), node.site_url))
        .collect();
    Some(truncate_chars(&lines.join("\n"), 1_024))
}

/// Render an UPPER_SNAKE enum value as display text.
///
/// Short all-caps values like `TV` and `OVA` stay as-is.
fn display_enum(raw: &str) -> String {
    if raw.len() <= 3 && !raw.contains('_') {
        return raw.to_owned();
    }

    raw.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use aika_anilist::model::{FuzzyDate, MediaTitle};

    use super::*;

    fn sample_media() -> Media {
        serde_json::from_value(serde_json::json!({
            "id": 101,
            "siteUrl": "https://anilist.co/anime/101",
            "format": "TV",
            "status": "FINISHED",
            "description": "A story.<br>Continued.",
            "title": { "romaji": "Sample", "english": null, "native": null },
            "startDate": { "year": 2020, "month": 1, "day": 10 },
            "endDate": { "year": 2020, "month": 3, "day": 27 },
            "episodes": 12,
            "averageScore": 81,
            "genres": ["Drama"],
            "coverImage": { "large": "https://img.example/cover.jpg" },
            "studios": { "nodes": [{ "name": "Sample Works" }] }
        }))
        .unwrap()
    }

    #[test]
    fn media_embed_renders_core_fields() {
        let embed = media_embed(&sample_media(), 2, 7).unwrap();

        assert_eq!(embed.title.as_deref(), Some("Sample"));
        assert_eq!(embed.url.as_deref(), Some("https://anilist.co/anime/101"));
        assert_eq!(embed.description.as_deref(), Some("A story.\nContinued."));
        assert_eq!(embed.footer.unwrap().text, "Page 2/7");

        let field_names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert!(field_names.contains(&"Format"));
        assert!(field_names.contains(&"Episodes"));
        assert!(field_names.contains(&"Aired"));
        assert!(field_names.contains(&"Studio"));
    }

    #[test]
    fn single_result_media_embed_has_no_footer() {
        let embed = media_embed(&sample_media(), 1, 1).unwrap();
        assert!(embed.footer.is_none());
    }

    #[test]
    fn adult_media_titles_are_flagged() {
        let mut media = sample_media();
        media.is_adult = true;
        let embed = media_embed(&media, 1, 1).unwrap();
        assert_eq!(embed.title.as_deref(), Some("🔞 Sample"));
    }

    #[test]
    fn enum_values_render_in_title_case() {
        assert_eq!(display_enum("NOT_YET_RELEASED"), "Not Yet Released");
        assert_eq!(display_enum("TV"), "TV");
        assert_eq!(display_enum("FINISHED"), "Finished");
    }

    #[test]
    fn date_range_handles_open_endings() {
        let mut media = sample_media();
        media.end_date = Some(FuzzyDate::default());
        assert_eq!(
            date_range(&media).as_deref(),
            Some("2020-01-10 → ongoing")
        );
    }

    #[test]
    fn media_links_are_markdown_lines() {
        let nodes = vec![MediaNode {
            site_url: "https://anilist.co/anime/1".to_owned(),
            format: Some("TV".to_owned()),
            title: MediaTitle {
                romaji: Some("First".to_owned()),
                english: None,
                native: None,
            },
        }];
        assert_eq!(
            media_links(&nodes).as_deref(),
            Some("[First](https://anilist.co/anime/1)")
        );
        assert!(media_links(&[]).is_none());
    }
}
