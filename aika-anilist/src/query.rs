//! GraphQL query documents sent to the AniList API.

/// Paged media search; `$search` is optional so the same document serves
/// random-media offset lookups.
pub const MEDIA_SEARCH: &str = "
query ($search: String, $type: MediaType, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    pageInfo { total currentPage lastPage hasNextPage perPage }
    media(search: $search, type: $type, sort: SEARCH_MATCH) {
      id siteUrl type format status description
      title { romaji english native }
      startDate { year month day }
      endDate { year month day }
      season seasonYear episodes chapters volumes
      coverImage { large color }
      bannerImage genres averageScore meanScore isAdult
      studios(isMain: true) { nodes { name } }
    }
  }
}
";

/// Paged media browse ordered by popularity, used for random lookups where
/// `SEARCH_MATCH` ordering is undefined without a search term.
pub const MEDIA_BROWSE: &str = "
query ($type: MediaType, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    pageInfo { total currentPage lastPage hasNextPage perPage }
    media(type: $type, sort: POPULARITY_DESC) {
      id siteUrl type format status description
      title { romaji english native }
      startDate { year month day }
      endDate { year month day }
      season seasonYear episodes chapters volumes
      coverImage { large color }
      bannerImage genres averageScore meanScore isAdult
      studios(isMain: true) { nodes { name } }
    }
  }
}
";

/// Paged character search.
pub const CHARACTER_SEARCH: &str = "
query ($search: String, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    pageInfo { total currentPage lastPage hasNextPage perPage }
    characters(search: $search, sort: SEARCH_MATCH) {
      id siteUrl description gender age
      name { full native }
      image { large }
      dateOfBirth { year month day }
      media(perPage: 5, sort: POPULARITY_DESC) { nodes { siteUrl title { romaji } } }
    }
  }
}
";

/// Paged staff search.
pub const STAFF_SEARCH: &str = "
query ($search: String, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    pageInfo { total currentPage lastPage hasNextPage perPage }
    staff(search: $search, sort: SEARCH_MATCH) {
      id siteUrl description languageV2 primaryOccupations
      name { full native }
      image { large }
      dateOfBirth { year month day }
      staffMedia(perPage: 5, sort: POPULARITY_DESC) { nodes { siteUrl title { romaji } } }
    }
  }
}
";

/// Paged studio search.
pub const STUDIO_SEARCH: &str = "
query ($search: String, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    pageInfo { total currentPage lastPage hasNextPage perPage }
    studios(search: $search, sort: SEARCH_MATCH) {
      id siteUrl name isAnimationStudio favourites
      media(perPage: 10, sort: POPULARITY_DESC, isMain: true) {
        nodes { siteUrl format title { romaji } }
      }
    }
  }
}
";

/// Single user lookup by name.
pub const USER_LOOKUP: &str = "
query ($name: String) {
  User(name: $name) {
    id siteUrl name about createdAt
    avatar { large }
    statistics {
      anime { count minutesWatched episodesWatched meanScore }
      manga { count chaptersRead volumesRead meanScore }
    }
  }
}
";
